use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(about = "Drive a ring buffer with random operations and check it against a shadow queue")]
pub struct Params {
    /// Number of enqueue/dequeue operations to perform
    #[clap(short, long, default_value_t = 1_000_000)]
    pub ops: u64,

    /// Total slots in the ring buffer, one of which is never filled
    #[clap(short, long, default_value_t = 5)]
    pub capacity: usize,

    /// Seed for the payload and decision streams, random when omitted
    #[clap(short, long)]
    pub seed: Option<u64>,
}
