//! Transcoder lookup by wire name and by value type.

use std::any::TypeId;
use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use super::transcoder::{DynTranscoder, Transcoder};
use crate::rfc::vcard::core::VCardProperty;
use crate::rfc::vcard::property::{self, RawTranscoder};

/// One lookup table: case-folded name and value `TypeId` to transcoder.
#[derive(Clone, Default)]
struct Table {
    by_name: HashMap<String, Arc<dyn DynTranscoder>>,
    by_type: HashMap<TypeId, Arc<dyn DynTranscoder>>,
}

impl Table {
    fn insert(&mut self, transcoder: Arc<dyn DynTranscoder>) {
        let name = transcoder.name().to_ascii_uppercase();
        if !name.is_empty() {
            self.by_name.insert(name, Arc::clone(&transcoder));
        }
        self.by_type.insert(transcoder.value_type_id(), transcoder);
    }

    fn by_name(&self, name: &str) -> Option<&Arc<dyn DynTranscoder>> {
        self.by_name.get(&name.to_ascii_uppercase())
    }

    fn by_type(&self, type_id: TypeId) -> Option<&Arc<dyn DynTranscoder>> {
        self.by_type.get(&type_id)
    }
}

/// The built-in catalogue, built once and shared by every registry.
static STANDARD: LazyLock<Table> = LazyLock::new(|| {
    let mut table = Table::default();
    for transcoder in property::standard_transcoders() {
        table.insert(transcoder);
    }
    table
});

/// Maps wire names and value types to transcoders.
///
/// Transcoders registered on an instance are consulted before the built-in
/// catalogue, so they can override built-in behaviour. Registries are cheap
/// to clone and independent of each other; readers and writers each own one.
///
/// Registration is not synchronized: finish registering before sharing a
/// registry between threads.
#[derive(Clone, Default)]
pub struct TranscoderRegistry {
    custom: Table,
}

impl TranscoderRegistry {
    /// A registry with only the built-in catalogue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a transcoder, replacing any previous one with the same wire
    /// name or value type.
    pub fn register<T: Transcoder>(&mut self, transcoder: T) {
        self.register_dyn(Arc::new(transcoder));
    }

    pub fn register_dyn(&mut self, transcoder: Arc<dyn DynTranscoder>) {
        tracing::debug!(
            name = transcoder.name(),
            value_type = transcoder.value_type_name(),
            "registering transcoder"
        );
        self.custom.insert(transcoder);
    }

    /// Transcoder registered for a wire name (case-insensitive).
    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<Arc<dyn DynTranscoder>> {
        self.custom
            .by_name(name)
            .or_else(|| STANDARD.by_name(name))
            .cloned()
    }

    /// Transcoder for decoding a wire name. Unknown names get a raw
    /// transcoder that keeps the name and value verbatim.
    #[must_use]
    pub fn for_decode(&self, name: &str) -> Arc<dyn DynTranscoder> {
        self.by_name(name)
            .unwrap_or_else(|| Arc::new(RawTranscoder::named(name)))
    }

    /// Transcoder for encoding a property, chosen by its value type.
    #[must_use]
    pub fn for_property(&self, property: &VCardProperty) -> Option<Arc<dyn DynTranscoder>> {
        self.by_type_id(property.value_type_id())
    }

    /// Transcoder for a value type.
    #[must_use]
    pub fn by_type<V: 'static>(&self) -> Option<Arc<dyn DynTranscoder>> {
        self.by_type_id(TypeId::of::<V>())
    }

    fn by_type_id(&self, type_id: TypeId) -> Option<Arc<dyn DynTranscoder>> {
        self.custom
            .by_type(type_id)
            .or_else(|| STANDARD.by_type(type_id))
            .cloned()
    }
}

impl std::fmt::Debug for TranscoderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&str> = self.custom.by_name.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("TranscoderRegistry")
            .field("custom", &names)
            .finish()
    }
}
