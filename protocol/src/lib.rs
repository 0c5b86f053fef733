//! Wire contract between the browser client and the remote chess engine.
//!
//! Every operation is a `POST` carrying a small JSON body; every reply is
//! either the operation's success payload or an [`ErrorResponse`].

#![no_std]

extern crate alloc;

use alloc::collections::BTreeMap;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use serde::de::{self, Deserializer, Unexpected, Visitor};
use serde::{Deserialize, Serialize};

/// Sparse board: square id (0..64, `a1 = 0`, `h8 = 63`) to piece symbol.
///
/// JSON objects only have string keys, so the ids travel as `"12"` and are
/// parsed back into integers on decode.
pub type SquareMap = BTreeMap<u8, char>;

#[derive(PartialEq, Eq, PartialOrd, Ord)]
struct SquareKey(u8);

impl<'de> Deserialize<'de> for SquareKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SquareKeyVisitor;

        impl Visitor<'_> for SquareKeyVisitor {
            type Value = SquareKey;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a square id")
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<SquareKey, E> {
                u8::try_from(v)
                    .map(SquareKey)
                    .map_err(|_| E::invalid_value(Unexpected::Unsigned(v), &self))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<SquareKey, E> {
                v.parse()
                    .map(SquareKey)
                    .map_err(|_| E::invalid_value(Unexpected::Str(v), &self))
            }
        }

        // untagged replies buffer keys as strings, so the key type can't be a bare u8
        deserializer.deserialize_any(SquareKeyVisitor)
    }
}

fn deserialize_square_map<'de, D: Deserializer<'de>>(deserializer: D) -> Result<SquareMap, D::Error> {
    let keyed = BTreeMap::<SquareKey, char>::deserialize(deserializer)?;
    Ok(keyed.into_iter().map(|(SquareKey(id), symbol)| (id, symbol)).collect())
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Self::Easy, Self::Medium, Self::Hard];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown difficulty: {s}"))
    }
}

/// Coarse classification of the engine's status line.
///
/// Engines should send it explicitly; when they don't, the client derives it
/// once with [`StatusCategory::classify`] and never looks at the text again.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusCategory {
    #[default]
    Ongoing,
    Check,
    Checkmate,
    Stalemate,
    Draw,
}

impl StatusCategory {
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Checkmate | Self::Stalemate | Self::Draw)
    }

    pub fn classify(status: &str) -> Self {
        let status = status.to_ascii_lowercase();
        // "checkmate" contains "check", so the terminal words go first
        if status.contains("checkmate") {
            Self::Checkmate
        } else if status.contains("stalemate") {
            Self::Stalemate
        } else if status.contains("draw") {
            Self::Draw
        } else if status.contains("check") {
            Self::Check
        } else {
            Self::Ongoing
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    Move,
    LegalMoves,
    Undo,
    Reset,
}

impl Endpoint {
    pub const fn path(self) -> &'static str {
        match self {
            Self::Start => "/start",
            Self::Move => "/move",
            Self::LegalMoves => "/legal_moves",
            Self::Undo => "/undo",
            Self::Reset => "/reset",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StartRequest {
    pub difficulty: Difficulty,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MoveRequest {
    pub from: u8,
    pub to: u8,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LegalMovesRequest {
    pub from: u8,
}

/// Reply of `start`, `undo` and `reset`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardResponse {
    #[serde(deserialize_with = "deserialize_square_map")]
    pub board: SquareMap,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<StatusCategory>,
}

impl BoardResponse {
    pub fn category(&self) -> StatusCategory {
        self.category
            .unwrap_or_else(|| StatusCategory::classify(&self.status))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MoveResponse {
    #[serde(deserialize_with = "deserialize_square_map")]
    pub board: SquareMap,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<StatusCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_move: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_move: Option<String>,
}

impl MoveResponse {
    pub fn category(&self) -> StatusCategory {
        self.category
            .unwrap_or_else(|| StatusCategory::classify(&self.status))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LegalMovesResponse {
    pub moves: Vec<u8>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Either shape an operation may answer with.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum EngineReply<T> {
    // must stay first: success payloads never carry an `error` key
    Failure(ErrorResponse),
    Success(T),
}

impl<T> EngineReply<T> {
    pub fn into_result(self) -> Result<T, String> {
        match self {
            Self::Success(value) => Ok(value),
            Self::Failure(ErrorResponse { error }) => Err(error),
        }
    }
}
