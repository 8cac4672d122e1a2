//! Selector input source trait
//!
//! The speed selector reads one raw level per channel each tick through
//! this trait. Anything holding a fixed bank of [`InputPin`]s implements it.

use traverse_hal::{InputPin, Level};

/// Bank of raw digital inputs, one per selector channel
pub trait ChannelInputs {
    /// Number of channels this source can read
    fn channel_count(&self) -> usize;

    /// Read the raw electrical level of a channel
    ///
    /// Indices at or past [`channel_count`](Self::channel_count) read as
    /// high, the idle level of a pulled-up switch, so a missing input is
    /// never taken as asserted on an active-low channel.
    fn read_channel(&mut self, index: usize) -> Level;
}

impl<P: InputPin, const N: usize> ChannelInputs for [P; N] {
    fn channel_count(&self) -> usize {
        N
    }

    fn read_channel(&mut self, index: usize) -> Level {
        self.get(index).map_or(Level::High, P::level)
    }
}

impl<P: InputPin, const N: usize> ChannelInputs for heapless::Vec<P, N> {
    fn channel_count(&self) -> usize {
        self.len()
    }

    fn read_channel(&mut self, index: usize) -> Level {
        self.get(index).map_or(Level::High, P::level)
    }
}

impl<T: ChannelInputs + ?Sized> ChannelInputs for &mut T {
    fn channel_count(&self) -> usize {
        (**self).channel_count()
    }

    fn read_channel(&mut self, index: usize) -> Level {
        (**self).read_channel(index)
    }
}
