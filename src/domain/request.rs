use chrono::{DateTime, Utc};

use crate::domain::validation::ValidationError;
use crate::domain::value::{
    CallbackUrl, MessageId, MessageText, MessageType, Recipient, SenderName, SmsId,
};

/// Timestamp layout used for `date_beg` / `date_end` (ISO-8601 with numeric offset).
const SEND_WINDOW_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";

/// Operation tag: the name of the element nested under `package`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Message,
    Status,
    Delete,
    Balance,
}

impl Operation {
    pub fn tag(self) -> &'static str {
        match self {
            Self::Message => "message",
            Self::Status => "status",
            Self::Delete => "delete",
            Self::Balance => "balance",
        }
    }
}

/// Input for [`crate::AlphaSmsClient::send`].
///
/// Fields are raw on purpose: the client resolves the sender against its configured
/// default and validates everything into a [`ResolvedMessage`] before any I/O.
/// Blank optional values are treated as absent.
#[derive(Debug, Clone, Default)]
pub struct SendMessage {
    pub text: String,
    pub recipient: String,
    /// Per-call alpha name; overrides the client default.
    pub sender: Option<String>,
    /// Defaults to [`MessageType::Sms`].
    pub message_type: Option<MessageType>,
    /// Caller-side id; generated when absent.
    pub id: Option<String>,
    /// Callback URL, required for [`MessageType::Push`] and ignored otherwise.
    pub url: Option<String>,
    pub date_beg: Option<DateTime<Utc>>,
    pub date_end: Option<DateTime<Utc>>,
}

impl SendMessage {
    pub fn new(text: impl Into<String>, recipient: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            recipient: recipient.into(),
            ..Default::default()
        }
    }

    /// Validate this input into a per-call [`ResolvedMessage`].
    ///
    /// `default_sender` is the client-level alpha name used when the message carries none.
    pub fn resolve(&self, default_sender: Option<&str>) -> Result<ResolvedMessage, ValidationError> {
        let sender = non_blank(self.sender.as_deref())
            .or_else(|| non_blank(default_sender))
            .ok_or(ValidationError::Empty {
                field: SenderName::FIELD,
            })?;
        let sender = SenderName::new(sender)?;

        let text = MessageText::new(self.text.as_str())?;
        let recipient = Recipient::new(self.recipient.as_str())?;

        let id = match non_blank(self.id.as_deref()) {
            Some(id) => MessageId::new(id)?,
            None => MessageId::generate(),
        };

        let message_type = self.message_type.unwrap_or_default();
        let callback_url = if message_type == MessageType::Push {
            let url = non_blank(self.url.as_deref()).ok_or(ValidationError::MissingCallbackUrl)?;
            Some(CallbackUrl::new(url)?)
        } else {
            None
        };

        let window = SendWindow::new(self.date_beg, self.date_end)?;

        Ok(ResolvedMessage {
            text,
            recipient,
            sender,
            message_type,
            id,
            callback_url,
            window,
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|it| !it.trim().is_empty())
}

/// A fully validated message, owned by a single `send` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedMessage {
    text: MessageText,
    recipient: Recipient,
    sender: SenderName,
    message_type: MessageType,
    id: MessageId,
    callback_url: Option<CallbackUrl>,
    window: SendWindow,
}

impl ResolvedMessage {
    pub fn text(&self) -> &MessageText {
        &self.text
    }

    pub fn recipient(&self) -> &Recipient {
        &self.recipient
    }

    pub fn sender(&self) -> &SenderName {
        &self.sender
    }

    pub fn message_type(&self) -> MessageType {
        self.message_type
    }

    pub fn id(&self) -> &MessageId {
        &self.id
    }

    /// Present only for [`MessageType::Push`].
    pub fn callback_url(&self) -> Option<&CallbackUrl> {
        self.callback_url.as_ref()
    }

    pub fn window(&self) -> &SendWindow {
        &self.window
    }
}

/// Optional delivery window (`date_beg` / `date_end`).
///
/// Invariant: when both bounds are present, `start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SendWindow {
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
}

impl SendWindow {
    pub const START_FIELD: &'static str = "date_beg";
    pub const END_FIELD: &'static str = "date_end";

    pub fn new(
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Result<Self, ValidationError> {
        if let (Some(start), Some(end)) = (start, end) {
            if start >= end {
                return Err(ValidationError::InvalidSendWindow {
                    start: format_timestamp(start),
                    end: format_timestamp(end),
                });
            }
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> Option<DateTime<Utc>> {
        self.start
    }

    pub fn end(&self) -> Option<DateTime<Utc>> {
        self.end
    }
}

/// Format a timestamp the way the gateway expects (`2014-09-03T18:50:56+0000`).
pub fn format_timestamp(value: DateTime<Utc>) -> String {
    value.format(SEND_WINDOW_FORMAT).to_string()
}

/// Input for [`crate::AlphaSmsClient::status`] and [`crate::AlphaSmsClient::delete`].
///
/// At least one of `id` and `sms_id` must be set; the client checks this before sending.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageLookup {
    pub id: Option<MessageId>,
    pub sms_id: Option<SmsId>,
}

impl MessageLookup {
    pub fn by_id(id: MessageId) -> Self {
        Self {
            id: Some(id),
            sms_id: None,
        }
    }

    pub fn by_sms_id(sms_id: SmsId) -> Self {
        Self {
            id: None,
            sms_id: Some(sms_id),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id.is_none() && self.sms_id.is_none() {
            return Err(ValidationError::MissingMessageReference);
        }
        Ok(())
    }
}
