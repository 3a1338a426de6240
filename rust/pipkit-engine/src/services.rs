//! Collaborators the engine calls out to but does not own: localized
//! strings and the persisted window size.

use std::rc::Rc;

use crate::error::StorageError;
use crate::host::PipWindowSize;

/// Storage key of the last known floating window size.
pub const SIZE_KEY: &str = "pip_window_size";

/// Localized strings shown on the control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKey {
    /// Accessible name of the control
    AriaLabel,
    /// Tooltip while Picture-in-Picture is off
    TooltipEnter,
    /// Tooltip while Picture-in-Picture is on
    TooltipExit,
}

impl MessageKey {
    /// The message name in the extension's locale catalog.
    pub fn as_str(self) -> &'static str {
        match self {
            MessageKey::AriaLabel => "ariaLabel",
            MessageKey::TooltipEnter => "tooltipEnter",
            MessageKey::TooltipExit => "tooltipExit",
        }
    }
}

/// Resolves a [`MessageKey`] to user-facing text.
pub trait Localizer {
    /// Text for `key` in the user's language.
    fn message(&self, key: MessageKey) -> String;
}

/// Falls back to the raw message name.
#[derive(Debug, Default, Clone, Copy)]
pub struct KeyLocalizer;

impl Localizer for KeyLocalizer {
    fn message(&self, key: MessageKey) -> String {
        key.as_str().to_string()
    }
}

/// Persists the floating window size under [`SIZE_KEY`].
pub trait SizeStore {
    /// Record the latest window size.
    fn save(&self, size: PipWindowSize) -> Result<(), StorageError>;
}

/// Drops every write.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiscardSizes;

impl SizeStore for DiscardSizes {
    fn save(&self, _size: PipWindowSize) -> Result<(), StorageError> {
        Ok(())
    }
}

impl<T: SizeStore + ?Sized> SizeStore for Rc<T> {
    fn save(&self, size: PipWindowSize) -> Result<(), StorageError> {
        (**self).save(size)
    }
}

/// The collaborators handed to an engine at construction.
pub struct Services {
    /// Control labels
    pub text: Box<dyn Localizer>,
    /// Window size persistence
    pub sizes: Box<dyn SizeStore>,
}

impl Default for Services {
    fn default() -> Self {
        Self {
            text: Box::new(KeyLocalizer),
            sizes: Box::new(DiscardSizes),
        }
    }
}

/// Encode a window size as the stored JSON record.
pub fn encode_size(size: PipWindowSize) -> Result<String, StorageError> {
    Ok(serde_json::to_string(&size)?)
}
