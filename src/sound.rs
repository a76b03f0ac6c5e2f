/// Fire-and-forget sound effects.

use log::trace;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sound {
    Shoot,
    Explosion,
}

/// Anything that can start a sound.  Playback never blocks and never fails
/// from the caller's point of view.
pub trait Audio {
    fn play(&mut self, sound: Sound);
}

/// Terminal builds have no mixer: requests are only traced.
#[derive(Debug, Default)]
pub struct SilentAudio;

impl Audio for SilentAudio {
    fn play(&mut self, sound: Sound) {
        trace!("play {:?}", sound);
    }
}
