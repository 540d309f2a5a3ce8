pub mod detect;
pub mod split;
pub mod to_json;
