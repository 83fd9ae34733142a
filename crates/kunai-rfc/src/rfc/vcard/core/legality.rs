//! Version legality of parameter names and values.
//!
//! One static table answers "is this parameter (or this TYPE value) legal in
//! that version" for every property, so the generic validation pass and
//! individual transcoders agree.

use super::data_type::VCardDataType;
use super::encoding::Encoding;
use super::version::VCardVersion::{self, V2_1, V3_0, V4_0};

const LEGACY: &[VCardVersion] = &[V2_1, V3_0];
const V3_ONLY: &[VCardVersion] = &[V3_0];
const V4_ONLY: &[VCardVersion] = &[V4_0];
const V21_ONLY: &[VCardVersion] = &[V2_1];

/// Parameter names restricted to a subset of versions.
static PARAMETER_NAMES: &[(&str, &[VCardVersion])] = &[
    ("ALTID", V4_ONLY),
    ("CALSCALE", V4_ONLY),
    ("CHARSET", V21_ONLY),
    ("ENCODING", LEGACY),
    ("GEO", V4_ONLY),
    ("INDEX", V4_ONLY),
    ("LEVEL", V4_ONLY),
    ("MEDIATYPE", V4_ONLY),
    ("PID", V4_ONLY),
    ("PREF", V4_ONLY),
    ("SORT-AS", V4_ONLY),
    ("TZ", V4_ONLY),
];

/// TYPE values restricted to a subset of versions. Values not listed here
/// (home, work, voice, image sub-types, extensions) are legal everywhere.
static TYPE_VALUES: &[(&str, &[VCardVersion])] = &[
    // Telephone
    ("bbs", LEGACY),
    ("car", LEGACY),
    ("isdn", LEGACY),
    ("modem", LEGACY),
    ("msg", LEGACY),
    ("pcs", V3_ONLY),
    ("pref", LEGACY),
    ("text", V4_ONLY),
    ("textphone", V4_ONLY),
    // Address
    ("dom", LEGACY),
    ("intl", LEGACY),
    ("parcel", LEGACY),
    ("postal", LEGACY),
    // Email
    ("aol", V21_ONLY),
    ("applelink", V21_ONLY),
    ("attmail", V21_ONLY),
    ("cis", V21_ONLY),
    ("eworld", V21_ONLY),
    ("ibmmail", V21_ONLY),
    ("internet", LEGACY),
    ("mcimail", V21_ONLY),
    ("powershare", V21_ONLY),
    ("prodigy", V21_ONLY),
    ("tlx", V21_ONLY),
    ("x400", LEGACY),
    // Related
    ("acquaintance", V4_ONLY),
    ("co-resident", V4_ONLY),
    ("co-worker", V4_ONLY),
    ("colleague", V4_ONLY),
    ("contact", V4_ONLY),
    ("crush", V4_ONLY),
    ("date", V4_ONLY),
    ("emergency", V4_ONLY),
    ("friend", V4_ONLY),
    ("kin", V4_ONLY),
    ("me", V4_ONLY),
    ("met", V4_ONLY),
    ("muse", V4_ONLY),
    ("neighbor", V4_ONLY),
    ("sibling", V4_ONLY),
    ("spouse", V4_ONLY),
    ("sweetheart", V4_ONLY),
];

/// Versions in which a parameter name is legal, or `None` if unrestricted.
#[must_use]
pub fn parameter_versions(name: &str) -> Option<&'static [VCardVersion]> {
    lookup(PARAMETER_NAMES, name)
}

/// Versions in which a (parameter, value) pair is legal, or `None` if the
/// table has nothing to say about it.
#[must_use]
pub fn value_versions(name: &str, value: &str) -> Option<&'static [VCardVersion]> {
    match name.to_ascii_uppercase().as_str() {
        "TYPE" => lookup(TYPE_VALUES, value),
        "ENCODING" => match Encoding::from_name(value) {
            Encoding::Other(_) => None,
            known => Some(known.supported_versions()),
        },
        "VALUE" => match VCardDataType::from_name(value) {
            VCardDataType::Other(_) => None,
            known => Some(known.supported_versions()),
        },
        _ => None,
    }
}

fn lookup(
    table: &'static [(&str, &'static [VCardVersion])],
    key: &str,
) -> Option<&'static [VCardVersion]> {
    table
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(key.trim()))
        .map(|(_, versions)| *versions)
}
