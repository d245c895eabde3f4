/// Application-level configuration consulted at registration time.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
	/// Skips layout-membership validation of callback declarations.
	///
	/// Enable when callbacks target components generated by other callbacks
	/// and therefore absent from the initial layout.
	pub suppress_callback_exceptions: bool,

	/// Default for registrations that do not set their own
	/// `prevent_initial_call` flag.
	pub prevent_initial_call: bool,
}
