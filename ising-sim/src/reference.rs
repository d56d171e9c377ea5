//! Analytical reference values for the zero-field square-lattice Ising model
//! (J = 1, k_B = 1). Used to compare simulations against; the engine never
//! reads them.

/// Onsager's exact critical temperature, 2 / ln(1 + √2) ≈ 2.269.
pub const ONSAGER_TC: f64 = 2.269_185_314_213_022;

/// Mean-field critical temperature for coordination number 4.
pub const MEAN_FIELD_TC: f64 = 4.0;

/// Onsager–Yang spontaneous magnetization per site, `(1 − sinh⁻⁴(2/T))^{1/8}`
/// below `ONSAGER_TC` and 0 at or above it.
pub fn spontaneous_magnetization(temperature: f64) -> f64 {
    if temperature >= ONSAGER_TC {
        return 0.0;
    }
    let s = (2.0 / temperature).sinh();
    (1.0 - s.powi(-4)).max(0.0).powf(0.125)
}
