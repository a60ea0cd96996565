//! Result type alias for MedVault
//!
//! This module provides a convenient Result type alias that uses MedVaultError
//! as the error type.

use super::errors::MedVaultError;

/// Result type alias for MedVault operations
///
/// This is a convenience type alias that uses `MedVaultError` as the error type.
/// Use this throughout the codebase for fallible operations.
///
/// # Examples
///
/// ```
/// use medvault::domain::result::Result;
/// use medvault::domain::errors::MedVaultError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(MedVaultError::Input("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, MedVaultError>;
