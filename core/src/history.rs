use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryEntry {
    pub number: u16,
    pub player: String,
    pub reply: Option<String>,
}

impl fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {}", self.number, self.player)?;
        if let Some(reply) = &self.reply {
            write!(f, " {}", reply)?;
        }
        Ok(())
    }
}

/// Moves confirmed by the engine, one entry per player move plus the
/// engine's automatic reply, if any.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MoveHistory {
    entries: Vec<HistoryEntry>,
}

impl MoveHistory {
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn push(&mut self, player: String, reply: Option<String>) {
        let number = self.entries.len().saturating_add(1).try_into().unwrap_or(u16::MAX);
        self.entries.push(HistoryEntry {
            number,
            player,
            reply,
        });
    }

    /// Undo reverts a player move together with its reply.
    pub fn pop(&mut self) -> Option<HistoryEntry> {
        self.entries.pop()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn last_move(&self) -> Option<String> {
        self.entries.last().map(|entry| match &entry.reply {
            Some(reply) => format!("{} · {}", entry.player, reply),
            None => entry.player.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn numbers_entries_and_formats_last_move() {
        let mut history = MoveHistory::default();
        assert_eq!(history.last_move(), None);

        history.push("e2e4".to_string(), None);
        assert_eq!(history.last_move().as_deref(), Some("e2e4"));

        history.push("g1f3".to_string(), Some("b8c6".to_string()));
        assert_eq!(history.last_move().as_deref(), Some("g1f3 · b8c6"));
        assert_eq!(history.entries()[1].to_string(), "2. g1f3 b8c6");

        history.pop();
        assert_eq!(history.last_move().as_deref(), Some("e2e4"));
        assert_eq!(history.entries()[0].to_string(), "1. e2e4");
    }
}
