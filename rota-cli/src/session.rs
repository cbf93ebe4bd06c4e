//! Per-invocation context: config, loaded state and the acting identity.

use std::path::PathBuf;

use anyhow::{Result, bail};
use chrono::Utc;
use rota_core::{Identity, Mutation, Rota};
use tracing::debug;

use crate::render::Render;
use crate::state::State;

/// Actor recorded for changes made without `--as`.
const OPERATOR: &str = "operator";

pub struct Session {
    pub rota: Rota,
    pub state: State,
    pub identity: Option<Identity>,
    data_path: PathBuf,
}

impl Session {
    /// Load config and data, and resolve `acting` (person id or e-mail) if given.
    pub fn open(acting: Option<&str>) -> Result<Self> {
        let rota = Rota::load()?;
        let data_path = rota.data_path();
        let state = State::load(&data_path)?;

        let identity = match acting {
            Some(who) => {
                let person = state
                    .directory
                    .person(who)
                    .or_else(|| state.directory.person_by_email(who));
                let Some(person) = person else {
                    bail!("No person with id or e-mail '{}'", who);
                };
                Some(Identity::resolve(person, &state.directory, rota.admin_emails()))
            }
            None => None,
        };

        debug!(data = %data_path.display(), acting = ?acting, "Opened session");

        Ok(Session {
            rota,
            state,
            identity,
            data_path,
        })
    }

    /// The acting identity; commands that check permissions need one.
    pub fn identity(&self) -> Result<&Identity> {
        match &self.identity {
            Some(identity) => Ok(identity),
            None => bail!("This command needs an acting person. Pass --as <person-id or e-mail>"),
        }
    }

    pub fn require(&self, allowed: bool, action: &str) -> Result<()> {
        if !allowed {
            let who = self.identity.as_ref().map_or(OPERATOR, |i| i.person_id.as_str());
            bail!("{} is not allowed to {}", who, action);
        }
        Ok(())
    }

    pub fn actor(&self) -> &str {
        self.identity
            .as_ref()
            .map_or(OPERATOR, |i| i.person_id.as_str())
    }

    /// Print a mutation and add it to the activity log.
    pub fn record(&mut self, mutation: Mutation) {
        println!("{}", mutation.render());
        let actor = self.actor().to_string();
        self.state.activity.record(&actor, Utc::now(), mutation);
    }

    pub fn save(&self) -> Result<()> {
        self.state.save(&self.data_path)
    }

    pub fn display_path(&self) -> String {
        self.rota.display_path().display().to_string()
    }
}
