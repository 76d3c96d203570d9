use clap::Parser;
use derive_builder::Builder;
use optrace_config::parse_url_arg;

#[derive(Debug, Clone, Parser, Builder)]
#[clap(
    about = "Simulate a call against a node and reconstruct a per-call-frame view of its execution trace"
)]
/// Arguments for the trace operation
///
/// This struct contains all the configuration parameters needed to simulate
/// a call against a node and reconstruct the call-frame view of its trace.
pub struct TraceArgs {
    /// The target contract address for the simulated call.
    #[clap(required = true)]
    pub target: String,

    /// The calldata for the simulated call, as a hex string.
    #[clap(required = true)]
    pub data: String,

    /// The RPC provider to use for the simulate call.
    /// This can be an explicit URL or a reference to a MESC endpoint.
    #[clap(long, short, value_parser = parse_url_arg, default_value = "", hide_default_value = true)]
    pub rpc_url: String,

    /// Optional value override for the simulated call, in wei.
    #[clap(long, default_value = None, hide_default_value = true)]
    pub value: Option<String>,

    /// Optional gas limit override for the simulated call.
    #[clap(long, default_value = None, hide_default_value = true)]
    pub gas: Option<u64>,

    /// The block to simulate against. Defaults to the current chain head.
    #[clap(long, short, default_value = None, hide_default_value = true)]
    pub block: Option<u64>,

    /// Bound, in milliseconds, on how long to wait for the node before
    /// reporting it unavailable.
    #[clap(long, short, default_value_t = optrace_config::DEFAULT_TRACE_TIMEOUT_MS)]
    pub timeout: u64,

    /// Source of an alternate collector program to inject instead of the
    /// built-in frame/opcode collector. The alternate collector must produce
    /// output matching the built-in collector's schema.
    #[clap(long, default_value = None, hide_default_value = true)]
    pub tracer: Option<String>,
}

impl TraceArgsBuilder {
    /// Creates a new TraceArgsBuilder with default values
    pub fn new() -> Self {
        Self {
            target: Some(String::new()),
            data: Some(String::new()),
            rpc_url: Some(String::new()),
            value: Some(None),
            gas: Some(None),
            block: Some(None),
            timeout: Some(optrace_config::DEFAULT_TRACE_TIMEOUT_MS),
            tracer: Some(None),
        }
    }
}
