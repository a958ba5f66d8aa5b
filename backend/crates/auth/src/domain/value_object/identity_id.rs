use kernel::id::Id;

pub struct IdentityMarker;

/// Store-assigned identity identifier
pub type IdentityId = Id<IdentityMarker>;
