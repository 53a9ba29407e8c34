//! Summary statistics over timing samples

use std::time::Duration;

/// Summary of one (method, size, density) cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleStats {
    pub count: usize,
    pub mean: Duration,
    pub min: Duration,
    pub max: Duration,
    /// Population standard deviation
    pub std_dev: Duration,
}

impl SampleStats {
    /// Summarizes `samples`; `None` when there are none
    pub fn from_samples(samples: &[Duration]) -> Option<Self> {
        let min = *samples.iter().min()?;
        let max = *samples.iter().max()?;

        let count = samples.len();
        let secs: Vec<f64> = samples.iter().map(Duration::as_secs_f64).collect();
        let mean = secs.iter().sum::<f64>() / count as f64;
        let variance = secs.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / count as f64;

        Some(Self {
            count,
            mean: Duration::from_secs_f64(mean),
            min,
            max,
            std_dev: Duration::from_secs_f64(variance.sqrt()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        assert_eq!(SampleStats::from_samples(&[]), None);
    }

    #[test]
    fn test_summary() {
        let samples = [
            Duration::from_millis(2),
            Duration::from_millis(4),
            Duration::from_millis(6),
        ];
        let stats = SampleStats::from_samples(&samples).unwrap();

        assert_eq!(stats.count, 3);
        assert_eq!(stats.min, Duration::from_millis(2));
        assert_eq!(stats.max, Duration::from_millis(6));
        assert!((stats.mean.as_secs_f64() - 0.004).abs() < 1e-9);
        // sqrt(8/3) ms
        assert!((stats.std_dev.as_secs_f64() - 0.001_632_993).abs() < 1e-8);
    }

    #[test]
    fn test_single_sample() {
        let stats = SampleStats::from_samples(&[Duration::from_micros(10)]).unwrap();
        assert_eq!(stats.std_dev, Duration::ZERO);
        assert_eq!(stats.min, stats.max);
    }
}
