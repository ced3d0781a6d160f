use bytemuck::{Pod, Zeroable};

/// Encoding settings for BC7.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct BC7Settings {
    pub(crate) use_3_subsets: u32,
    pub(crate) quick: u32,
    pub(crate) validate: u32,
    pub(crate) shape_divisor: u32,
}

impl BC7Settings {
    /// Only tries mode 6. Fastest, lowest quality.
    pub const fn quick() -> Self {
        Self {
            use_3_subsets: false as _,
            quick: true as _,
            validate: false as _,
            shape_divisor: 4,
        }
    }

    /// Tries every mode except the 3 region modes 0 and 2.
    pub const fn basic() -> Self {
        Self {
            use_3_subsets: false as _,
            quick: false as _,
            validate: false as _,
            shape_divisor: 4,
        }
    }

    /// Tries every mode.
    pub const fn slow() -> Self {
        Self {
            use_3_subsets: true as _,
            quick: false as _,
            validate: false as _,
            shape_divisor: 4,
        }
    }

    /// Tries every mode and refines every shape.
    pub const fn very_slow() -> Self {
        Self {
            use_3_subsets: true as _,
            quick: false as _,
            validate: false as _,
            shape_divisor: 1,
        }
    }

    /// Re-decodes every encoded block and logs blocks that break the format invariants.
    pub const fn with_validation(mut self, validate: bool) -> Self {
        self.validate = validate as _;
        self
    }

    /// Number of rough shape candidates refined is `max(1, shapes / divisor)`.
    ///
    /// A divisor of 0 is treated as 1.
    pub const fn with_shape_divisor(mut self, divisor: u32) -> Self {
        self.shape_divisor = divisor;
        self
    }

    #[inline]
    pub(crate) const fn uses_3_subsets(&self) -> bool {
        self.use_3_subsets != 0
    }

    #[inline]
    pub(crate) const fn is_quick(&self) -> bool {
        self.quick != 0
    }

    #[inline]
    pub(crate) const fn validates(&self) -> bool {
        self.validate != 0
    }

    /// How many shapes out of `shape_count` get refined.
    #[inline]
    pub(crate) fn refined_shapes(&self, shape_count: usize) -> usize {
        let divisor = self.shape_divisor.max(1) as usize;
        usize::max(1, shape_count / divisor)
    }
}

impl Default for BC7Settings {
    fn default() -> Self {
        Self::basic()
    }
}
