// v2 session endpoints
//
// Discovery (`/api/info`), login/logout and the current-user record that
// carries the site privilege list. The token returned by `/login` is
// stamped on every later request; cookies ride along in the client's jar.

use reqwest::Method;
use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use tracing::{debug, info};

use crate::auth::{CurrentUser, LoginResult, SiteKeys};
use crate::error::Error;
use crate::v2::client::{OmadaClient, Payload, QueryParams, Session};
use crate::v2::models::ApiInfo;

impl OmadaClient {
    /// Controller discovery.
    ///
    /// `GET /api/info` (outside `/api/v2`, no auth). On v5+ controllers the
    /// result carries `omadacId`, which prefixes every other path.
    pub async fn api_info(&self) -> Result<ApiInfo, Error> {
        let url = self.root_url("/api/info")?;
        debug!(%url, "fetching controller info");
        let info: Option<ApiInfo> = self.send_public(self.http().get(url)).await?.into_result()?;
        Ok(info.unwrap_or_default())
    }

    /// Log in with username/password.
    ///
    /// Idempotent: when a session already exists this returns the stored
    /// [`LoginResult`] without any network traffic. Otherwise discovers the
    /// controller id, posts the credentials to `/login`, and fetches
    /// `/users/current` with the new token. The session (token, user, site
    /// table) is committed only after all three succeed.
    pub async fn login(
        &mut self,
        username: &str,
        password: &SecretString,
    ) -> Result<LoginResult, Error> {
        if let Some(session) = &self.session {
            debug!("already logged in");
            return Ok(session.login.clone());
        }

        let info = self.api_info().await?;
        let controller_id = info
            .omadac_id
            .filter(|id| !id.is_empty())
            .map(|id| format!("/{id}"))
            .unwrap_or_default();

        let url = self.api_url_for(&controller_id, "/login")?;
        debug!(%url, username, "logging in");
        let body = json!({
            "username": username,
            "password": password.expose_secret(),
        });
        let envelope = self.send_public(self.http().post(url).json(&body)).await?;
        if envelope.error_code != 0 {
            return Err(Error::Authentication {
                message: format!(
                    "errorCode={}, msg={}",
                    envelope.error_code,
                    envelope.msg.as_deref().unwrap_or("none")
                ),
            });
        }
        let login: LoginResult = envelope.into_result()?;

        let user: CurrentUser = self
            .send_stamped(
                Method::GET,
                self.api_url_for(&controller_id, "/users/current")?,
                QueryParams::new(),
                Payload::Empty,
                &login.token,
            )
            .await?;
        let sites = SiteKeys::from_user(&user);

        info!(sites = sites.len(), "login successful");
        self.controller_id = controller_id;
        self.session = Some(Session {
            login: login.clone(),
            user,
            sites,
        });
        Ok(login)
    }

    /// End the current session.
    ///
    /// No-op when not logged in. Local state (token, user, site table) is
    /// cleared before the `POST /logout` result is inspected, so a failed
    /// logout still leaves the client logged out; the failure is returned.
    pub async fn logout(&mut self) -> Result<(), Error> {
        let Some(session) = self.session.take() else {
            return Ok(());
        };

        debug!("logging out");
        let outcome: Result<Option<serde_json::Value>, Error> = self
            .dispatch(
                Method::POST,
                "/logout",
                QueryParams::new(),
                Payload::Empty,
                &session.login.token,
            )
            .await;
        drop(session);

        outcome?;
        debug!("logout complete");
        Ok(())
    }

    /// `GET /loginStatus`
    pub async fn login_status(&self) -> Result<serde_json::Value, Error> {
        self.get("/loginStatus", QueryParams::new()).await
    }

    /// Fresh copy of the current user record.
    ///
    /// `GET /users/current`. Does not rebuild the site table.
    pub async fn current_user(&self) -> Result<CurrentUser, Error> {
        self.get("/users/current", QueryParams::new()).await
    }
}
