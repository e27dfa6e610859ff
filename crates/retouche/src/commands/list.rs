//! List command - Show the registered transformations

use retouche_core::Transformation;

pub fn run() {
    let width = Transformation::ALL
        .iter()
        .map(|t| t.name().len())
        .max()
        .unwrap_or_default();
    for transformation in Transformation::ALL {
        println!(
            "{:width$}  {}",
            transformation.name(),
            transformation.description()
        );
    }
}
