// simulation/mod.rs
// The two screen models: ideal gas (with lid and hold-constant feedback) and diffusion.

pub mod diffusion;
pub mod ideal_gas;

pub use diffusion::DiffusionModel;
pub use ideal_gas::IdealGasModel;

#[cfg(test)]
mod tests;
