#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct LayerId(pub u64);

/// A long-lived render layer handle.
///
/// Layers are created once per session and mutated through lightweight
/// property updates; interactions never rebuild them.
pub trait Layer {
    fn id(&self) -> LayerId;
}
