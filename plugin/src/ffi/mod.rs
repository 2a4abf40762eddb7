pub mod abi;
pub mod guard;
pub mod safety;
