//! Credential record model

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::matcher::MatchStrategy;
use crate::models::Side;
use crate::normalize::{normalize_url, normalize_username};

/// Exporter a record was parsed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    /// Format A: `Title, URL, Username, Password, Notes, OTPAuth`
    Apple,
    /// Format B: `name, url, username, password`
    Google,
}

impl Origin {
    /// The other exporter.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::Apple => Self::Google,
            Self::Google => Self::Apple,
        }
    }

    /// Lowercase tag used in ids and CSV columns.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Apple => "apple",
            Self::Google => "google",
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Apple => f.write_str("Apple"),
            Self::Google => f.write_str("Google"),
        }
    }
}

/// Provenance left on a merged record by the engine.
///
/// Kept apart from the user's `notes` so exports never carry engine chatter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AuditNote {
    /// No counterpart was found in the other collection
    OnlyIn { origin: Origin },
    /// Merged with an equal-password counterpart
    Matched {
        strategy: MatchStrategy,
        counterpart: Origin,
    },
    /// Paired with a counterpart whose password differs
    Conflict {
        #[serde(default)]
        conflict_id: String,
        strategy: MatchStrategy,
        kept: Origin,
    },
    /// Appended by a directional merge
    AddedFrom { origin: Origin },
    /// A user decision replaced the record content
    Resolved {
        conflict_id: String,
        side: Side,
        origin: Origin,
    },
}

impl AuditNote {
    /// True for notes that show the record was paired with the other origin.
    #[must_use]
    pub const fn is_pairing(&self) -> bool {
        matches!(self, Self::Matched { .. } | Self::Conflict { .. })
    }
}

impl fmt::Display for AuditNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OnlyIn { origin } => write!(f, "Only in {origin}"),
            Self::Matched {
                strategy,
                counterpart,
            } => write!(f, "Merged with {counterpart} entry ({strategy})"),
            Self::Conflict {
                conflict_id,
                strategy,
                kept,
            } => write!(f, "Conflict {conflict_id}: kept {kept} ({strategy})"),
            Self::AddedFrom { origin } => write!(f, "Added from {origin}"),
            Self::Resolved {
                conflict_id,
                side,
                origin,
            } => write!(f, "Resolved {conflict_id}: chose {side} ({origin})"),
        }
    }
}

/// A credential entry from either exporter.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Unique within its collection; reassigned in merged output
    pub id: String,
    pub title: String,
    pub url: String,
    pub username: String,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub otp_auth: Option<String>,
    pub origin: Origin,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub audit: Vec<AuditNote>,
}

impl fmt::Debug for Record {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Record")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("url", &self.url)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("notes", &self.notes)
            .field("otp_auth", &self.otp_auth.as_ref().map(|_| "[REDACTED]"))
            .field("origin", &self.origin)
            .field("audit", &self.audit)
            .finish()
    }
}

impl Record {
    /// Create an empty record with the given id and origin
    #[must_use]
    pub fn new(id: impl Into<String>, origin: Origin) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            url: String::new(),
            username: String::new(),
            password: String::new(),
            notes: None,
            otp_auth: None,
            origin,
            audit: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    #[must_use]
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = username.into();
        self
    }

    #[must_use]
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = password.into();
        self
    }

    #[must_use]
    pub fn with_notes(mut self, notes: Option<String>) -> Self {
        self.notes = notes;
        self
    }

    #[must_use]
    pub fn with_otp_auth(mut self, otp_auth: Option<String>) -> Self {
        self.otp_auth = otp_auth;
        self
    }

    /// Append an audit note, returning the record
    #[must_use]
    pub fn with_audit(mut self, note: AuditNote) -> Self {
        self.audit.push(note);
        self
    }

    /// `normalizedUrl::normalizedUsername`, the strongest identity key
    #[must_use]
    pub fn exact_key(&self) -> String {
        format!(
            "{}::{}",
            normalize_url(&self.url),
            normalize_username(&self.username)
        )
    }

    /// True when the record carries a pairing note from a merge.
    #[must_use]
    pub fn was_paired(&self) -> bool {
        self.audit.iter().any(AuditNote::is_pairing)
    }

    /// Title for listings, falling back to the URL
    #[must_use]
    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            &self.url
        } else {
            &self.title
        }
    }

    /// True when neither url nor username carries content.
    #[must_use]
    pub fn is_unusable(&self) -> bool {
        self.url.trim().is_empty() && self.username.trim().is_empty()
    }
}
