//! Group members and how they travel.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Coordinate;

/// Error returned when parsing an invalid member identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid member id: {reason}")]
pub struct InvalidMemberId {
    reason: &'static str,
}

/// Opaque identifier of a group member.
///
/// Any non-blank string is accepted; surrounding whitespace is trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(String);

impl MemberId {
    /// Parse a member identifier.
    pub fn parse(s: &str) -> Result<Self, InvalidMemberId> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(InvalidMemberId {
                reason: "must not be blank",
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Positional identifier (`member-1`, `member-2`, ...) for callers that
    /// don't supply their own.
    pub fn positional(index: usize) -> Self {
        Self(format!("member-{}", index + 1))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How a member travels to the meeting point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    /// Train, estimated from straight-line distance.
    #[default]
    Rail,
    /// Automobile, routed over the road network.
    Car,
}

impl TransportMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransportMode::Rail => "rail",
            TransportMode::Car => "car",
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A person taking part in a meeting-point search.
///
/// The departure point stays `None` until the caller sets it; a search
/// refuses to run while any member is missing one.
#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    pub id: MemberId,
    pub name: String,
    pub departure: Option<Coordinate>,
    /// Place name the departure was picked from, for display only.
    pub departure_label: String,
    pub mode: TransportMode,
}

impl Member {
    /// Create a member with no departure point yet.
    pub fn new(id: MemberId, name: impl Into<String>, mode: TransportMode) -> Self {
        Self {
            id,
            name: name.into(),
            departure: None,
            departure_label: String::new(),
            mode,
        }
    }

    /// Set the departure point.
    pub fn with_departure(mut self, departure: Coordinate) -> Self {
        self.departure = Some(departure);
        self
    }

    /// Set the display label for the departure point.
    pub fn with_departure_label(mut self, label: impl Into<String>) -> Self {
        self.departure_label = label.into();
        self
    }

    /// Whether this member can take part in a search.
    pub fn has_departure(&self) -> bool {
        self.departure.is_some()
    }
}
