//! Colored progress output for verbose engines.

use colored::Colorize;

const WIDTH: usize = 8;
const PREC_WIDTH: usize = 5;

pub(crate) fn print_setup(solver: &str, interior_point: bool) {
    let profile = if interior_point { "barrier" } else { "default" };
    println!(
        "solver {} ({profile} profile)",
        solver.bold().cyan(),
    );
    println!(
        "{:>WIDTH$}\t{:>WIDTH$}\t{:>WIDTH$}",
        "POOL".bold().red(),
        "RHO".bold().blue(),
        "GAMMA".bold().green(),
    );
}

pub(crate) fn print_update(n_classifiers: usize, rho: f64, gamma: f64) {
    println!(
        "{n_classifiers:>WIDTH$}\t\
        {rho:>WIDTH$.PREC_WIDTH$}\t\
        {gamma:>WIDTH$.PREC_WIDTH$}"
    );
}
