pub mod container_tests;
pub mod inflate_tests;
pub mod gate_tests;
pub mod proof_tests;
