//! Auth Handlers

use jiff::Timestamp;
use salvo::http::cookie::{Cookie, SameSite, time::Duration as CookieDuration};
use vermeil_app::auth::IssuedSession;

use crate::auth::middleware::SESSION_COOKIE;

pub(crate) mod login;
pub(crate) mod logout;
pub(crate) mod me;
pub(crate) mod register;

/// Session cookie for a freshly issued session. `HttpOnly` keeps scripts
/// away from the token; `Lax` still sends it on the top-level redirect back
/// from the payment provider.
fn session_cookie(session: IssuedSession) -> Cookie<'static> {
    let max_age = session.expires_at.duration_since(Timestamp::now());

    Cookie::build((SESSION_COOKIE, session.token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(CookieDuration::seconds(max_age.as_secs()))
        .build()
}

/// An expired overwrite of the session cookie, matching the attributes of
/// [`session_cookie`] so browsers drop the original.
fn removal_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(CookieDuration::ZERO)
        .build()
}
