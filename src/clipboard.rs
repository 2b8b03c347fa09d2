// clipboard.rs - Clipboard capability used by the line-cut command
use anyhow::Result;
use std::sync::{Arc, Mutex};

/// Something the engine can hand cut text to.
///
/// Writes are fire-and-forget from the engine's point of view: a failing
/// writer is logged and the edit still goes through.
pub trait ClipboardWriter {
    fn write_text(&mut self, text: &str) -> Result<()>;
}

/// System clipboard backed by arboard.
#[cfg(feature = "clipboard")]
pub struct SystemClipboard {
    inner: arboard::Clipboard,
}

#[cfg(feature = "clipboard")]
impl SystemClipboard {
    pub fn new() -> Result<Self> {
        match arboard::Clipboard::new() {
            Ok(clipboard) => Ok(Self { inner: clipboard }),
            Err(e) => Err(anyhow::anyhow!("Failed to initialize clipboard: {}", e)),
        }
    }
}

#[cfg(feature = "clipboard")]
impl ClipboardWriter for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<()> {
        self.inner
            .set_text(text)
            .map_err(|e| anyhow::anyhow!("Failed to set clipboard text: {}", e))
    }
}

/// In-process clipboard. Clones share the same contents, so a test can keep
/// one handle and give the other to the engine.
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    contents: Arc<Mutex<Option<String>>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> Option<String> {
        self.contents.lock().ok().and_then(|guard| guard.clone())
    }
}

impl ClipboardWriter for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> Result<()> {
        let mut guard = self
            .contents
            .lock()
            .map_err(|_| anyhow::anyhow!("Clipboard lock poisoned"))?;
        *guard = Some(text.to_string());
        Ok(())
    }
}

/// Clipboard used when no system clipboard is reachable (headless sessions).
#[derive(Debug, Default, Clone, Copy)]
pub struct NoClipboard;

impl ClipboardWriter for NoClipboard {
    fn write_text(&mut self, _text: &str) -> Result<()> {
        Err(anyhow::anyhow!("No clipboard available"))
    }
}

/// Best available clipboard: the system one when it initialises, else an
/// in-memory one so cut lines are at least kept for the session.
pub fn default_writer() -> Box<dyn ClipboardWriter> {
    #[cfg(feature = "clipboard")]
    {
        match SystemClipboard::new() {
            Ok(clipboard) => return Box::new(clipboard),
            Err(e) => log::warn!("{}; falling back to in-memory clipboard", e),
        }
    }
    Box::new(MemoryClipboard::new())
}
