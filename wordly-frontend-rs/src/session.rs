//! The demo sign-in gate. One fixed account, stored in plain text under `wordlyUser`.

use cubby::KeyValueStore;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::storage::{self, USER_KEY};
use crate::{Wordbook, WordlyError};

const DEMO_USERNAME: &str = "admin";
const DEMO_PASSWORD: &str = "admin";

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(target_arch = "wasm32", derive(tsify::Tsify))]
#[cfg_attr(target_arch = "wasm32", tsify(into_wasm_abi, from_wasm_abi))]
#[serde(rename_all = "camelCase", default)]
pub struct User {
    pub username: String,
    pub is_authenticated: bool,
}

impl<S: KeyValueStore, R: Rng> Wordbook<S, R> {
    /// Signed-out default when nobody is stored.
    pub fn current_user(&self) -> User {
        storage::load_or_default(&self.store, USER_KEY)
    }

    /// Wrong credentials return `Ok(false)` and leave any stored user alone.
    pub fn login(&mut self, username: &str, password: &str) -> Result<bool, WordlyError> {
        if username != DEMO_USERNAME || password != DEMO_PASSWORD {
            log::info!("Rejected sign-in for `{username}`");
            return Ok(false);
        }
        let user = User {
            username: username.to_string(),
            is_authenticated: true,
        };
        storage::save(&mut self.store, USER_KEY, &user)?;
        log::info!("Signed in as {username}");
        Ok(true)
    }

    pub fn logout(&mut self) -> Result<(), WordlyError> {
        self.store.remove(USER_KEY)?;
        Ok(())
    }
}
