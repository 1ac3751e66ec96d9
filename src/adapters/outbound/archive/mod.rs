/// Archive adapters (JAR/WAR/ZIP)
mod zip_codec;

pub use zip_codec::ZipArchiveCodec;
