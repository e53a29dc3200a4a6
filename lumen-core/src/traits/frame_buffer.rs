//! Frame buffer trait for the projector's video input

/// All channels off
pub const BLACK: u32 = 0x0000_0000;

/// All channels at full intensity
pub const WHITE: u32 = 0xFFFF_FFFF;

/// Errors that can occur with frame buffer operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameBufferError {
    /// Frame buffer device not available
    Unavailable,
    /// Image does not match the buffer geometry or pixel format
    IncompatibleImage,
    /// Page flip did not complete
    SwapFailed,
}

impl core::fmt::Display for FrameBufferError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            FrameBufferError::Unavailable => write!(f, "Frame buffer unavailable"),
            FrameBufferError::IncompatibleImage => write!(f, "Incompatible image"),
            FrameBufferError::SwapFailed => write!(f, "Frame buffer swap failed"),
        }
    }
}

/// Double-buffered display surface feeding the projector
///
/// The projector driver never inspects buffer contents. It only decides
/// when content is written and when it becomes visible relative to the
/// illumination source.
pub trait FrameBuffer {
    /// Image type accepted by [`blit`](Self::blit)
    type Image: ?Sized;

    /// Composite an image into the off-screen buffer
    ///
    /// Does not change what is currently displayed.
    fn blit(&mut self, image: &Self::Image) -> Result<(), FrameBufferError>;

    /// Fill the visible buffer with a single 32-bit color
    fn fill(&mut self, color: u32) -> Result<(), FrameBufferError>;

    /// Make the off-screen buffer visible
    fn swap(&mut self) -> Result<(), FrameBufferError>;
}

impl<T: FrameBuffer + ?Sized> FrameBuffer for &mut T {
    type Image = T::Image;

    fn blit(&mut self, image: &Self::Image) -> Result<(), FrameBufferError> {
        (**self).blit(image)
    }

    fn fill(&mut self, color: u32) -> Result<(), FrameBufferError> {
        (**self).fill(color)
    }

    fn swap(&mut self) -> Result<(), FrameBufferError> {
        (**self).swap()
    }
}
