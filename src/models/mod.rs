mod budget;
mod period;

pub use budget::{Budget, CategoryBudgets};
pub use period::{month_name, month_number, Period};

#[cfg(test)]
mod tests;
