pub mod errors;
pub mod path;

pub use errors::WalletError;
pub use path::DerivationPath;
