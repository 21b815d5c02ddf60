//! Shared data model: class identifiers, parameter descriptors,
//! prototypes, and character normalization features.

pub mod class_id;
pub mod collections;
pub mod feature;
pub mod param_desc;
pub mod prototype;

pub use class_id::{ClassId, NO_CLASS};
pub use feature::{CharNormParam, Feature};
pub use param_desc::ParamDesc;
pub use prototype::{Distribution, Prototype, PrototypeStyle};
