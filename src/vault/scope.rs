//! Scope classification by top-level vault folder.

/// Visibility scope of a vault file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    /// Under the player folder: visible in both views.
    Player,
    /// Under the dm folder: dm view only.
    Dm,
    /// Anywhere else: dm view only.
    Global,
}

/// The two configured folder names that decide scope.
#[derive(Debug, Clone)]
pub struct ScopeFolders {
    player: String,
    dm: String,
}

impl ScopeFolders {
    pub fn new(player: &str, dm: &str) -> Self {
        Self {
            player: player.to_owned(),
            dm: dm.to_owned(),
        }
    }

    pub fn player(&self) -> &str {
        &self.player
    }

    pub fn dm(&self) -> &str {
        &self.dm
    }

    /// Classify a posix vault-relative path.
    ///
    /// The path matches a folder when it equals the folder name or starts
    /// with `folder/`. `"Player Sectionals/x.md"` is therefore `Global`.
    pub fn classify(&self, relative: &str) -> Scope {
        if is_under(relative, &self.player) {
            Scope::Player
        } else if is_under(relative, &self.dm) {
            Scope::Dm
        } else {
            Scope::Global
        }
    }
}

fn is_under(relative: &str, folder: &str) -> bool {
    relative
        .strip_prefix(folder)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}
