use ringfifo_rs::RingFifo;
use std::time::Instant;

fn main() {
    println!("RingFifo Zero-Copy Example");
    println!("===========================\n");

    const CAPACITY: usize = 64 * 1024;
    const TOTAL: usize = 50_000_000;
    const BLOCK_SIZE: usize = 4096;

    let mut fifo = RingFifo::<u64>::new(CAPACITY);

    println!("Configuration:");
    println!("  FIFO capacity: {} elements", fifo.capacity());
    println!("  Block size: {}", BLOCK_SIZE);
    println!("  Total elements: {}\n", TOTAL);

    let start = Instant::now();

    let mut written = 0usize;
    let mut read = 0usize;
    let mut checksum = 0u64;

    while read < TOTAL {
        // Producer side: reserve, write directly into the buffer, commit.
        // In a real pipeline the write between reserve and commit would be
        // an asynchronous or overlapped I/O transfer into the views.
        if written < TOTAL {
            let want = BLOCK_SIZE
                .min(TOTAL - written)
                .min(fifo.reservable_size());
            if want > 0 {
                let mut block = fifo.reserve(want).unwrap();
                for (i, slot) in block.iter_mut().enumerate() {
                    *slot = (written + i) as u64;
                }
                drop(block);
                fifo.commit(want).unwrap();
                written += want;
            }
        }

        // Consumer side: the views are already retired when handed out.
        let available = fifo.readable_size();
        if available > 0 {
            let block = fifo.read_block(available).unwrap();
            for item in block.iter() {
                checksum = checksum.wrapping_add(*item);
            }
            read += available;
        }
    }

    let duration = start.elapsed();
    let elements_per_sec = read as f64 / duration.as_secs_f64();
    let bytes_per_sec = elements_per_sec * 8.0;

    println!("Results:");
    println!("  Elements moved: {}", read);
    println!("  Checksum: {}", checksum);
    println!("  Duration: {:.2?}", duration);
    println!(
        "  Throughput: {:.2} million elements/sec",
        elements_per_sec / 1_000_000.0
    );
    println!("  Bandwidth: {:.2} GB/sec", bytes_per_sec / 1_000_000_000.0);
}
