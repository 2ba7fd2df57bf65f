//! Pagination button codec.
//!
//! Paged audit views put opaque tokens in their button custom ids:
//! `prev_<index>_<TAG>[_<subject>]`, `next_<index>_<TAG>[_<subject>]` and the standalone
//! `delete`. Tags contain underscores, so decoding matches the remainder against the known
//! tag set instead of splitting on every `_`. Any token that does not decode is ignored.

use serenity::all::ButtonStyle;

use crate::server::bot::reply::ReplyButton;

/// Records shown on each audit page.
pub const PAGE_SIZE: usize = 10;

/// Custom id of the button that deletes a paged message.
pub const DELETE_TOKEN: &str = "delete";

/// The command a page token belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageTag {
    ReloadAudit,
    WarnAudit,
    KickAudit,
    BanAudit,
    TimeOutAudit,
    SoftBanAudit,
    AmountAudit,
}

impl PageTag {
    pub const ALL: [PageTag; 7] = [
        PageTag::ReloadAudit,
        PageTag::WarnAudit,
        PageTag::KickAudit,
        PageTag::BanAudit,
        PageTag::TimeOutAudit,
        PageTag::SoftBanAudit,
        PageTag::AmountAudit,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::ReloadAudit => "RELOAD_AUDIT",
            Self::WarnAudit => "WARN_AUDIT",
            Self::KickAudit => "KICK_AUDIT",
            Self::BanAudit => "BAN_AUDIT",
            Self::TimeOutAudit => "TIME_OUT_AUDIT",
            Self::SoftBanAudit => "SOFT_BAN_AUDIT",
            Self::AmountAudit => "AMOUNT_AUDIT",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Prev,
    Next,
}

impl Direction {
    fn as_str(self) -> &'static str {
        match self {
            Self::Prev => "prev",
            Self::Next => "next",
        }
    }
}

/// A decoded page button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageToken {
    pub direction: Direction,
    /// Page the message was showing when the button was rendered.
    pub index: usize,
    pub tag: PageTag,
    /// User the paged records are about, absent for global views such as reloads.
    pub subject: Option<u64>,
}

impl PageToken {
    pub fn new(direction: Direction, index: usize, tag: PageTag, subject: Option<u64>) -> Self {
        Self {
            direction,
            index,
            tag,
            subject,
        }
    }

    pub fn encode(&self) -> String {
        let mut token = format!("{}_{}_{}", self.direction.as_str(), self.index, self.tag.as_str());
        if let Some(subject) = self.subject {
            token.push('_');
            token.push_str(&subject.to_string());
        }
        token
    }

    /// Page to render when this button is pressed.
    ///
    /// Going back from the first page stays on the first page. Going forward is
    /// unbounded; the renderer shows an empty page past the end.
    pub fn target_page(&self) -> usize {
        match self.direction {
            Direction::Prev => self.index.saturating_sub(1),
            Direction::Next => self.index.saturating_add(1),
        }
    }
}

/// A decoded button custom id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentAction {
    Page(PageToken),
    Delete,
}

/// Decodes a button custom id, returning `None` for anything not produced by `encode`.
pub fn decode(custom_id: &str) -> Option<ComponentAction> {
    if custom_id == DELETE_TOKEN {
        return Some(ComponentAction::Delete);
    }

    let (direction, rest) = if let Some(rest) = custom_id.strip_prefix("prev_") {
        (Direction::Prev, rest)
    } else if let Some(rest) = custom_id.strip_prefix("next_") {
        (Direction::Next, rest)
    } else {
        return None;
    };

    let (index, rest) = rest.split_once('_')?;
    if index.is_empty() || !index.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let index = index.parse::<usize>().ok()?;

    PageTag::ALL.into_iter().find_map(|tag| {
        let remainder = rest.strip_prefix(tag.as_str())?;
        let subject = if remainder.is_empty() {
            None
        } else {
            let subject = remainder.strip_prefix('_')?;
            if subject.is_empty() || !subject.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            Some(subject.parse::<u64>().ok()?)
        };

        Some(ComponentAction::Page(PageToken::new(
            direction, index, tag, subject,
        )))
    })
}

/// The records on page `index`, empty when the page lies past the end.
pub fn page_slice<T>(records: &[T], index: usize) -> &[T] {
    let start = index.saturating_mul(PAGE_SIZE).min(records.len());
    let end = start.saturating_add(PAGE_SIZE).min(records.len());
    &records[start..end]
}

/// Previous, next and delete buttons for page `index`.
pub fn page_buttons(tag: PageTag, index: usize, subject: Option<u64>) -> Vec<ReplyButton> {
    vec![
        ReplyButton::new(
            PageToken::new(Direction::Prev, index, tag, subject).encode(),
            "Previous",
            ButtonStyle::Primary,
        ),
        ReplyButton::new(
            PageToken::new(Direction::Next, index, tag, subject).encode(),
            "Next",
            ButtonStyle::Primary,
        ),
        ReplyButton::new(DELETE_TOKEN, "Delete", ButtonStyle::Danger),
    ]
}
