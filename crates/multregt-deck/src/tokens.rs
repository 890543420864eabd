//! Decoders for the string-valued MULTREGT items.

use multregt_core::{ConnectionFilter, DirectionSet};

/// Decode a `REGION_DEF` token into a classification name.
///
/// The single-letter codes `O`, `F` and `M` name `OPERNUM`, `FLUXNUM` and
/// `MULTNUM` in either case. Any other token is taken as a classification
/// name exactly as written, less surrounding whitespace. Returns `None` for
/// a blank token.
pub fn region_name(token: &str) -> Option<String> {
    let token = token.trim();
    if token.is_empty() {
        return None;
    }
    let name = match token {
        "O" | "o" => "OPERNUM",
        "F" | "f" => "FLUXNUM",
        "M" | "m" => "MULTNUM",
        other => other,
    };
    Some(name.to_string())
}

/// Decode a `DIRECTIONS` token.
///
/// Each axis letter contributes both of its faces, so `"XZ"` covers
/// X+, X-, Z+ and Z-.
pub fn directions(token: &str) -> Option<DirectionSet> {
    let set = match token.trim().to_ascii_uppercase().as_str() {
        "X" => DirectionSet::X,
        "Y" => DirectionSet::Y,
        "Z" => DirectionSet::Z,
        "XY" => DirectionSet::X.union(DirectionSet::Y),
        "XZ" => DirectionSet::X.union(DirectionSet::Z),
        "YZ" => DirectionSet::Y.union(DirectionSet::Z),
        "XYZ" => DirectionSet::ALL,
        _ => return None,
    };
    Some(set)
}

/// Decode an `NNC_MULT` token.
pub fn connection_filter(token: &str) -> Option<ConnectionFilter> {
    let filter = match token.trim().to_ascii_uppercase().as_str() {
        "NNC" => ConnectionFilter::NncOnly,
        "NONNC" => ConnectionFilter::NeighbourOnly,
        "ALL" => ConnectionFilter::All,
        "NOAQUNNC" => ConnectionFilter::NoAquiferNnc,
        _ => return None,
    };
    Some(filter)
}
