use super::session::SessionError;
use crate::model::player::PlayerId;

const LOCAL_ALIAS: &str = "you";

/// Maps the log's second-person alias onto the local player's real name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentityResolver {
    local: Option<PlayerId>,
}

impl IdentityResolver {
    pub fn new(local: Option<PlayerId>) -> Self {
        Self { local }
    }

    pub fn local(&self) -> Option<&PlayerId> {
        self.local.as_ref()
    }

    pub fn is_alias(id: &PlayerId) -> bool {
        id.as_str().eq_ignore_ascii_case(LOCAL_ALIAS)
    }

    pub fn resolve(&self, id: PlayerId) -> Result<PlayerId, SessionError> {
        if !Self::is_alias(&id) {
            return Ok(id);
        }
        self.local
            .clone()
            .ok_or_else(|| SessionError::UnresolvedIdentity(id.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pid(name: &str) -> PlayerId {
        PlayerId::new(name).unwrap()
    }

    #[test]
    fn alias_maps_to_local_player() {
        let resolver = IdentityResolver::new(Some(pid("Alice")));
        assert_eq!(resolver.resolve(pid("You")).unwrap(), pid("Alice"));
        assert_eq!(resolver.resolve(pid("you")).unwrap(), pid("Alice"));
        assert_eq!(resolver.resolve(pid("Bob")).unwrap(), pid("Bob"));
    }

    #[test]
    fn alias_without_local_player_is_rejected() {
        let resolver = IdentityResolver::default();
        assert_eq!(
            resolver.resolve(pid("YOU")),
            Err(SessionError::UnresolvedIdentity("YOU".to_string()))
        );
        assert_eq!(resolver.resolve(pid("Youssef")).unwrap(), pid("Youssef"));
    }
}
