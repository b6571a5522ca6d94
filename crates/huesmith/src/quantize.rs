use rand::Rng;
use tracing::debug;

use crate::color::{Oklab, Rgb};
use crate::Float;

/// Pixels this transparent do not contribute to the palette.
const MIN_ALPHA: u8 = 16;

/// The usability filters for bucket representatives, in HSL percentages.
/// Near-gray and near-white or near-black colors make poor palette seeds.
const MIN_SATURATION: Float = 8.0;
const MIN_LIGHTNESS: Float = 10.0;
const MAX_LIGHTNESS: Float = 92.0;

/// Representatives closer than this perceptual distance collapse into one.
const DEDUPE_THRESHOLD: Float = 0.02;

/// Find the channel with the widest range over the bucket. Equally wide
/// channels are tie-broken at random so repeated extractions do not always
/// cut the same way.
fn widest_channel<R: Rng>(bucket: &[[u8; 3]], rng: &mut R) -> usize {
    let mut min = [u8::MAX; 3];
    let mut max = [u8::MIN; 3];
    for pixel in bucket {
        for channel in 0..3 {
            min[channel] = min[channel].min(pixel[channel]);
            max[channel] = max[channel].max(pixel[channel]);
        }
    }

    let ranges = [max[0] - min[0], max[1] - min[1], max[2] - min[2]];
    let widest = ranges[0].max(ranges[1]).max(ranges[2]);
    let candidates: Vec<usize> = (0..3).filter(|&channel| ranges[channel] == widest).collect();
    if candidates.len() == 1 {
        candidates[0]
    } else {
        candidates[rng.random_range(0..candidates.len())]
    }
}

/// Average a non-empty bucket to its representative color.
fn average(bucket: &[[u8; 3]]) -> Rgb {
    let mut sum = [0_usize; 3];
    for pixel in bucket {
        for channel in 0..3 {
            sum[channel] += pixel[channel] as usize;
        }
    }

    let half = bucket.len() / 2;
    let count = bucket.len();
    Rgb::new(
        ((sum[0] + half) / count) as u8,
        ((sum[1] + half) / count) as u8,
        ((sum[2] + half) / count) as u8,
    )
}

// ====================================================================================================================

/// Extract up to `count` palette seed colors from an RGBA8 pixel buffer.
///
/// The pixels are recursively median-cut: each round splits every bucket at
/// the median of its widest channel, to a depth that yields roughly twice as
/// many buckets as requested colors. Each bucket averages to one
/// representative. Representatives that are too gray, too dark, or too
/// light are discarded, near-duplicates collapse, and the survivors are
/// returned most saturated first.
///
/// An empty buffer, a fully transparent buffer, or a buffer whose
/// representatives are all filtered out yields an empty result, never an
/// error. Trailing bytes that do not form a whole RGBA pixel are ignored.
pub fn extract<R: Rng>(pixels: &[u8], count: usize, rng: &mut R) -> Vec<Rgb> {
    if count == 0 {
        return Vec::new();
    }

    let samples: Vec<[u8; 3]> = pixels
        .chunks_exact(4)
        .filter(|pixel| pixel[3] >= MIN_ALPHA)
        .map(|pixel| [pixel[0], pixel[1], pixel[2]])
        .collect();
    if samples.is_empty() {
        return Vec::new();
    }

    let depth = (count * 2).next_power_of_two().trailing_zeros();
    debug!(pixels = samples.len(), count, depth, "extracting palette");

    let mut buckets = vec![samples];
    for _ in 0..depth {
        let mut split = Vec::with_capacity(buckets.len() * 2);
        for mut bucket in buckets {
            if bucket.len() < 2 {
                split.push(bucket);
                continue;
            }

            let channel = widest_channel(&bucket, rng);
            bucket.sort_unstable_by_key(|pixel| pixel[channel]);
            let tail = bucket.split_off(bucket.len() / 2);
            split.push(bucket);
            split.push(tail);
        }
        buckets = split;
    }

    let mut representatives: Vec<Rgb> = buckets
        .iter()
        .filter(|bucket| !bucket.is_empty())
        .map(|bucket| average(bucket))
        .collect();
    representatives.retain(|color| {
        let hsl = color.to_hsl();
        hsl.s >= MIN_SATURATION && (MIN_LIGHTNESS..=MAX_LIGHTNESS).contains(&hsl.l)
    });

    let mut unique: Vec<(Rgb, Oklab)> = Vec::with_capacity(representatives.len());
    for color in representatives {
        let oklab = color.to_oklab();
        if unique
            .iter()
            .all(|(_, kept)| kept.difference(&oklab) >= DEDUPE_THRESHOLD)
        {
            unique.push((color, oklab));
        }
    }

    let mut survivors: Vec<(Rgb, Float)> = unique
        .into_iter()
        .map(|(color, _)| (color, color.to_hsl().s))
        .collect();
    survivors.sort_by(|entry1, entry2| {
        entry2
            .1
            .partial_cmp(&entry1.1)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    survivors.truncate(count);
    debug!(
        buckets = buckets.len(),
        survivors = survivors.len(),
        "extracted palette"
    );
    survivors.into_iter().map(|(color, _)| color).collect()
}

/// Extract palette seed colors with the thread-local generator. See
/// [`extract`].
pub fn extract_default(pixels: &[u8], count: usize) -> Vec<Rgb> {
    extract(pixels, count, &mut rand::rng())
}

// ====================================================================================================================
