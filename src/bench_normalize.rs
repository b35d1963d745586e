use ep_normalize::{normalize_with_config, NormalizerConfig};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::time::{Duration, Instant};

fn count_xml_events(xml: &str) -> Result<usize, String> {
    let mut reader = Reader::from_str(xml);
    let mut count = 0;
    loop {
        match reader.read_event() {
            Ok(Event::Eof) => break,
            Ok(_) => count += 1,
            Err(e) => {
                return Err(format!(
                    "XML error at position {}: {e}",
                    reader.error_position()
                ))
            }
        }
    }
    Ok(count)
}

fn summarize(label: &str, durations: &[Duration]) -> f64 {
    let secs = durations.iter().map(Duration::as_secs_f64).collect::<Vec<_>>();
    let avg = secs.iter().sum::<f64>() / secs.len().max(1) as f64;
    let min = secs.iter().copied().fold(f64::INFINITY, f64::min);
    println!("{label} avg: {:.6}s, min: {:.6}s", avg, min);
    avg
}

fn main() -> Result<(), String> {
    let path = std::env::args()
        .nth(1)
        .ok_or("Usage: bench_normalize <document.xml>")?;
    let xml = std::fs::read_to_string(&path).map_err(|e| format!("Failed to read {path}: {e}"))?;
    let config = NormalizerConfig {
        log_diagnostics: false,
        ..Default::default()
    };

    let iterations = 20;

    let mut baseline = Vec::with_capacity(iterations);
    let mut events = 0;
    for _ in 0..iterations {
        let start = Instant::now();
        events = count_xml_events(&xml)?;
        baseline.push(start.elapsed());
    }
    println!("{events} XML events per pass");
    let baseline_avg = summarize("Baseline", &baseline);

    let mut durations = Vec::with_capacity(iterations);
    for _ in 0..iterations {
        let start = Instant::now();
        let normalized =
            normalize_with_config(xml.as_bytes(), &config).map_err(|e| e.to_string())?;
        durations.push(start.elapsed());
        std::hint::black_box(normalized);
    }
    let avg = summarize("Normalize", &durations);
    println!("Overhead vs baseline: {:.1}x", avg / baseline_avg);
    Ok(())
}
