pub mod acquiring_bank;

pub use acquiring_bank::{AcquiringBankConfig, HttpAcquiringBank};
