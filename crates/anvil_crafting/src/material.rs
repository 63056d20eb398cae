//! # Material Identity
//!
//! A material is "the same resource" as another when their ids match **or**
//! their names match ignoring case. Recipes and the inventory are built from
//! different sources (a recipe file names materials, a config may number
//! them), and this union of keys is what lets the two agree.
//!
//! ## Non-transitivity
//!
//! The relation is not transitive: `(1, "Iron")` equals `(1, "Wood")` and
//! `(1, "Wood")` equals `(2, "wood")`, yet `(1, "Iron")` does not equal
//! `(2, "wood")`. No hash function can respect such a relation, so every
//! collection in this crate keyed by [`Material`] uses a linear scan with
//! [`PartialEq`]. The [`Hash`] impl hashes `(id, lowercased name)`; it is
//! only sound for data that uses one identity key consistently, and
//! pathological cross-matches are not guaranteed to collapse in a
//! `HashMap`.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use siphasher::sip::SipHasher13;

use crate::error::{CraftError, CraftResult};

/// Numeric identifier for a material.
pub type MaterialId = u64;

/// Ids with this bit set were derived from a name by [`Material::named`].
pub const DERIVED_ID_BIT: MaterialId = 1 << 63;

const NAME_KEY: (u64, u64) = (0x616E_7669_6C5F_6D61, 0x7465_7269_616C_5F69);

/// A craftable resource type.
#[derive(Clone, Debug)]
pub struct Material {
    id: MaterialId,
    name: String,
}

impl Material {
    /// Creates a material with an explicit id.
    #[must_use]
    pub fn new(id: MaterialId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Creates a material known only by name.
    ///
    /// The id is derived from the lowercased name, so two materials named
    /// `"Iron"` and `"iron"` get the same id, and the derived id never
    /// collides with a hand-assigned id below [`DERIVED_ID_BIT`].
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into();
        let id = derive_id(&name);
        Self { id, name }
    }

    /// The numeric id.
    #[inline]
    #[must_use]
    pub const fn id(&self) -> MaterialId {
        self.id
    }

    /// The display name.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns true if the id was derived from the name.
    #[inline]
    #[must_use]
    pub const fn has_derived_id(&self) -> bool {
        self.id & DERIVED_ID_BIT != 0
    }
}

fn derive_id(name: &str) -> MaterialId {
    let mut hasher = SipHasher13::new_with_keys(NAME_KEY.0, NAME_KEY.1);
    for c in name.chars().flat_map(char::to_lowercase) {
        hasher.write_u32(u32::from(c));
    }
    hasher.finish() | DERIVED_ID_BIT
}

/// Compares two names ignoring case, without allocating.
pub(crate) fn names_match(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

impl PartialEq for Material {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id || names_match(&self.name, &other.name)
    }
}

impl Eq for Material {}

impl Hash for Material {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
        for c in self.name.chars().flat_map(char::to_lowercase) {
            c.hash(state);
        }
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Parses `"id,name"` or a bare `"name"`.
impl FromStr for Material {
    type Err = CraftError;

    fn from_str(s: &str) -> CraftResult<Self> {
        let (id, name) = match s.split_once(',') {
            Some((id, name)) => (Some(id.trim()), name.trim()),
            None => (None, s.trim()),
        };

        if name.is_empty() {
            return Err(CraftError::InvalidMaterial(s.to_string()));
        }

        match id {
            Some(raw) => {
                let id = raw.parse::<MaterialId>().map_err(|_| CraftError::Parse {
                    field: "material id".to_string(),
                    value: raw.to_string(),
                    line: None,
                })?;
                Ok(Self::new(id, name))
            }
            None => Ok(Self::named(name)),
        }
    }
}
