//! Request handlers for the villadesk API.

mod auth;
mod contact;
mod property;
mod statics;

pub use auth::{auth_status, change_password, login, logout};
pub use contact::submit_contact;
pub use property::{create_property, delete_property, get_property, list_properties, update_property};
pub use statics::login_page;

use std::sync::Arc;

use axum_extra::extract::cookie::{Cookie, SameSite};

use crate::auth::{
    CredentialSource, MemorySessionStore, SessionManager, SessionStore, SqliteSessionStore,
};
use crate::config::{Config, CredentialSourceKind, SessionBackend};
use crate::db::Database;
use crate::images::ImageStore;
use crate::web::middleware::PublicPaths;
use crate::{Result, VillaError};

/// Application state shared across handlers and middleware.
pub struct AppState {
    /// Database handle.
    pub db: Database,
    /// Session lifecycle manager.
    pub sessions: SessionManager,
    /// Credential source, selected once at startup.
    pub credentials: CredentialSource,
    /// Uploaded image storage.
    pub images: ImageStore,
    /// Guard allow-list.
    pub public_paths: PublicPaths,
    cookie_name: String,
    secure_cookies: bool,
    login_page: String,
    dashboard_page: String,
    admin_path: String,
    site_path: String,
}

impl AppState {
    /// Build the application state from configuration and an opened database.
    pub fn new(config: &Config, db: Database) -> Result<Self> {
        let store: Arc<dyn SessionStore> = match config.session.backend {
            SessionBackend::Sqlite => Arc::new(SqliteSessionStore::new(db.pool().clone())),
            SessionBackend::Memory => Arc::new(MemorySessionStore::new()),
        };
        let sessions = SessionManager::new(store, config.session.ttl_hours);

        let credentials = match config.auth.credential_source {
            CredentialSourceKind::Store => CredentialSource::store_backed(db.pool().clone()),
            CredentialSourceKind::Static => CredentialSource::static_fallback(
                &config.auth.static_username,
                &config.auth.static_password,
            )
            .map_err(|e| VillaError::Config(format!("static credentials: {e}")))?,
        };

        let images = ImageStore::new(
            &config.static_files.uploads_path,
            &config.static_files.placeholder_image,
        )?;

        Ok(Self {
            db,
            sessions,
            credentials,
            images,
            public_paths: PublicPaths::from_config(&config.guard),
            cookie_name: config.session.cookie_name.clone(),
            secure_cookies: config.server.production,
            login_page: config.guard.login_page.clone(),
            dashboard_page: config.guard.dashboard_page.clone(),
            admin_path: config.static_files.admin_path.clone(),
            site_path: config.static_files.site_path.clone(),
        })
    }

    /// Name of the session cookie.
    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    /// Login page path, target of unauthenticated redirects.
    pub fn login_page(&self) -> &str {
        &self.login_page
    }

    /// Dashboard path, target after successful login.
    pub fn dashboard_page(&self) -> &str {
        &self.dashboard_page
    }

    /// Directory holding the admin panel assets.
    pub fn admin_path(&self) -> &str {
        &self.admin_path
    }

    /// Directory holding the public site assets.
    pub fn site_path(&self) -> &str {
        &self.site_path
    }

    /// Build the session cookie for an established session.
    ///
    /// HttpOnly and SameSite=Lax always; Secure only in production so local
    /// development over plain HTTP keeps working.
    pub fn session_cookie(&self, id: String) -> Cookie<'static> {
        let mut cookie = Cookie::new(self.cookie_name.clone(), id);
        cookie.set_path("/");
        cookie.set_http_only(true);
        cookie.set_same_site(SameSite::Lax);
        cookie.set_secure(self.secure_cookies);
        cookie
    }

    /// Build the removal cookie that clears the session cookie on the client.
    pub fn clear_session_cookie(&self) -> Cookie<'static> {
        let mut cookie = Cookie::new(self.cookie_name.clone(), "");
        cookie.set_path("/");
        cookie
    }
}
