pub mod asset;

pub use asset::AssetMetadataRecord;
