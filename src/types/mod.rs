//! Data model: upstream CRD input shapes (§3, §6) and the v2 registries
//! configuration output shapes.

mod input;
mod output;

pub use input::{Icsp, IcspSpec, Idms, IdmsSpec, Itms, ItmsSpec, MirrorMapping, ObjectMeta};
pub use output::{Mirror, PullFromMirror, Registry, ShortNameMode, V2RegistriesConf};
