use crate::error::InvalidComponentOrderError;
use crate::ComponentOrder;

/// Binds a [ComponentOrder] to its instantiation policy.
///
/// A profile with `always_instantiated` set describes a tree that is built
/// eagerly and is never observed in the uninstantiated state. Without the
/// flag, the tree defers allocating its structure until a bulk load
/// populates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TreeProfile {
    components: ComponentOrder,
    always_instantiated: bool,
}

impl TreeProfile {
    /// Creates a new [TreeProfile].
    pub fn new(components: ComponentOrder, always_instantiated: bool) -> Self {
        Self {
            components,
            always_instantiated,
        }
    }

    /// Creates a new [TreeProfile] from a raw order vector.
    pub fn try_new(
        order: [usize; 4],
        always_instantiated: bool,
    ) -> Result<Self, InvalidComponentOrderError> {
        Ok(Self::new(ComponentOrder::try_from(order)?, always_instantiated))
    }

    /// The ordering of the described tree.
    pub fn components(&self) -> ComponentOrder {
        self.components
    }

    /// Whether the described tree is built eagerly.
    pub fn always_instantiated(&self) -> bool {
        self.always_instantiated
    }
}
