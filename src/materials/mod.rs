//! Materials under the vibration source
//!
//! * `families` - Parameter packs for the sheared layer
//! * `viscoelastic` - Kelvin-Voigt and Maxwell complex moduli
//! * `symbolic` - Expression trees used by the viscoelastic derivations

pub mod families;
pub mod symbolic;
pub mod utils;
pub mod viscoelastic;

pub use families::LayerParams;
pub use symbolic::{Bindings, Expr, Symbol};
pub use utils::check;
pub use viscoelastic::{
    ModulusDerivation, ModulusValues, ViscoelasticModel, WorkedExample, worked_example,
};
