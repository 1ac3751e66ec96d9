/// Ports module defining the interfaces of the hexagonal architecture
///
/// Outbound (driven) ports are the only seams: the trimming core calls them
/// and adapters implement them.
pub mod outbound;
