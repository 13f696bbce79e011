use std::future::Future;

use tracing::{debug, warn};

use crate::error::Error;
use crate::photos::PhotoList;

/// Fetches an image resource so it is ready to present. Injected into the
/// renderer so transition behavior is testable without a real surface.
pub trait ResourceLoader {
    fn load(&self, url: &str) -> impl Future<Output = Result<(), Error>> + Send;
}

/// One of the two render slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    A,
    B,
}

impl Slot {
    fn other(self) -> Slot {
        match self {
            Slot::A => Slot::B,
            Slot::B => Slot::A,
        }
    }

    fn index(self) -> usize {
        match self {
            Slot::A => 0,
            Slot::B => 1,
        }
    }
}

/// Two render slots with exactly one visible at any instant. The crossfade
/// binds the incoming photo to the hidden slot and flips visibility in a
/// single step, so there is never a frame with both or neither slot shown.
#[derive(Debug)]
pub struct RenderBuffers {
    visible: Slot,
    bound: [Option<String>; 2],
}

impl Default for RenderBuffers {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderBuffers {
    pub fn new() -> Self {
        Self {
            visible: Slot::A,
            bound: [None, None],
        }
    }

    pub fn visible_slot(&self) -> Slot {
        self.visible
    }

    pub fn visible_url(&self) -> Option<&str> {
        self.bound[self.visible.index()].as_deref()
    }

    pub fn standby_url(&self) -> Option<&str> {
        self.bound[self.visible.other().index()].as_deref()
    }

    fn bind_visible(&mut self, url: &str) {
        self.bound[self.visible.index()] = Some(url.to_string());
    }

    fn bind_standby(&mut self, url: &str) {
        self.bound[self.visible.other().index()] = Some(url.to_string());
    }

    fn swap(&mut self) {
        self.visible = self.visible.other();
    }
}

/// Performs the two-buffer crossfade between the photo on screen and the
/// next one in the list.
#[derive(Debug)]
pub struct TransitionRenderer<L> {
    buffers: RenderBuffers,
    loader: L,
}

impl<L: ResourceLoader> TransitionRenderer<L> {
    pub fn new(loader: L) -> Self {
        Self {
            buffers: RenderBuffers::new(),
            loader,
        }
    }

    pub fn buffers(&self) -> &RenderBuffers {
        &self.buffers
    }

    /// Show `list[index]` in the visible buffer directly (initial render,
    /// no crossfade). A load failure is tolerated: the slot is bound anyway
    /// and the surface shows whatever the resource eventually yields.
    pub async fn show(&mut self, list: &PhotoList, index: usize) -> Result<(), Error> {
        let photo = list.get(index).ok_or_else(|| {
            Error::Invariant(format!(
                "render index {index} out of range for list of {}",
                list.len()
            ))
        })?;
        if let Err(err) = self.loader.load(&photo.url).await {
            warn!(url = %photo.url, %err, "initial load failed; binding anyway");
        }
        self.buffers.bind_visible(&photo.url);
        debug!(index, url = %photo.url, "photo shown");
        Ok(())
    }

    /// Crossfade one step forward: preload `list[(from + 1) % len]` into the
    /// standby buffer and flip visibility only once the load succeeds.
    ///
    /// Returns the index now on screen — the target on success, `from`
    /// unchanged if the preload failed (the next tick tries again) or if the
    /// list holds fewer than two photos.
    pub async fn advance(&mut self, list: &PhotoList, from: usize) -> usize {
        if list.len() < 2 {
            return from;
        }
        let to = (from + 1) % list.len();
        let Some(photo) = list.get(to) else {
            return from;
        };
        match self.loader.load(&photo.url).await {
            Ok(()) => {
                self.buffers.bind_standby(&photo.url);
                self.buffers.swap();
                debug!(from, to, url = %photo.url, "crossfade complete");
                to
            }
            Err(err) => {
                warn!(url = %photo.url, %err, "preload failed; holding current frame");
                from
            }
        }
    }
}
