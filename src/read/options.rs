//! Knobs for a decode run.

use super::Error;

use alloc::sync::Arc;
use core::sync::atomic::{AtomicBool, Ordering};

/// What to do when the archive stream's CRC-16 does not match its header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CrcPolicy {
    /// Don't compare.
    Ignore,
    /// Log a warning and keep going.
    #[default]
    Warn,
    /// Fail with [`Error::CrcMismatch`].
    Enforce,
}

/// A shared flag that stops a running decode at the next file or record boundary.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> CancelToken {
        return CancelToken::default();
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        return self.0.load(Ordering::Relaxed);
    }
}

#[derive(Debug, Clone)]
pub struct DecodeOptions {
    /// Rasterize image segments. Image tags are written either way.
    pub images: bool,
    pub crc: CrcPolicy,
    pub cancel: Option<CancelToken>,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        return DecodeOptions {
            images: true,
            crc: CrcPolicy::default(),
            cancel: None,
        };
    }
}

impl DecodeOptions {
    pub fn new() -> DecodeOptions {
        return DecodeOptions::default();
    }

    pub fn images(mut self, images: bool) -> DecodeOptions {
        self.images = images;
        return self;
    }

    pub fn crc(mut self, policy: CrcPolicy) -> DecodeOptions {
        self.crc = policy;
        return self;
    }

    pub fn cancel_token(mut self, token: CancelToken) -> DecodeOptions {
        self.cancel = Some(token);
        return self;
    }

    pub(crate) fn check_cancel(&self) -> Result<(), Error> {
        match &self.cancel {
            Some(token) if token.is_cancelled() => return Err(Error::Cancelled),
            _ => return Ok(()),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn defaults() {
        let opts = DecodeOptions::default();
        assert!(opts.images);
        assert_eq!(opts.crc, CrcPolicy::Warn);
        assert!(opts.check_cancel().is_ok());
    }

    #[test]
    fn cancelling_a_clone_cancels_the_options() {
        let token = CancelToken::new();
        let opts = DecodeOptions::new()
            .images(false)
            .crc(CrcPolicy::Enforce)
            .cancel_token(token.clone());
        assert!(opts.check_cancel().is_ok());
        token.cancel();
        assert_eq!(opts.check_cancel(), Err(Error::Cancelled));
    }
}
