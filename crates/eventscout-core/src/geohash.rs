//! Geohash encoding.
//!
//! Interleaves binary subdivisions of the longitude and latitude ranges,
//! longitude first, and emits one base-32 symbol per five bits.

use crate::GeohashError;

/// Symbol table indexed by each completed 5-bit group.
pub const ALPHABET: &[u8; 32] = b"0123456789bcdefghjkmnpqrstuvwxyz";

/// Longest precision accepted by [`encode`].
pub const MAX_PRECISION: usize = 12;

const BIT_WEIGHTS: [u8; 5] = [16, 8, 4, 2, 1];

/// Encodes a coordinate pair into a geohash of exactly `precision` symbols.
///
/// A coordinate lying exactly on a bisection midpoint falls into the lower
/// half, so `encode(0.0, 0.0, 5)` is `"7zzzz"`.
///
/// # Errors
///
/// - [`GeohashError::LatitudeOutOfRange`] if `latitude` is not finite or lies
///   outside `[-90, 90]`.
/// - [`GeohashError::LongitudeOutOfRange`] if `longitude` is not finite or
///   lies outside `[-180, 180]`.
/// - [`GeohashError::InvalidPrecision`] if `precision` is not in
///   `1..=MAX_PRECISION`.
pub fn encode(latitude: f64, longitude: f64, precision: usize) -> Result<String, GeohashError> {
    if !(-90.0..=90.0).contains(&latitude) {
        return Err(GeohashError::LatitudeOutOfRange(latitude));
    }
    if !(-180.0..=180.0).contains(&longitude) {
        return Err(GeohashError::LongitudeOutOfRange(longitude));
    }
    if !(1..=MAX_PRECISION).contains(&precision) {
        return Err(GeohashError::InvalidPrecision(precision));
    }

    let mut lat_interval = (-90.0_f64, 90.0_f64);
    let mut lon_interval = (-180.0_f64, 180.0_f64);
    let mut hash = String::with_capacity(precision);
    let mut even = true;
    let mut bit = 0;
    let mut ch = 0_u8;

    while hash.len() < precision {
        let (interval, value) = if even {
            (&mut lon_interval, longitude)
        } else {
            (&mut lat_interval, latitude)
        };

        let mid = (interval.0 + interval.1) / 2.0;
        if value > mid {
            ch |= BIT_WEIGHTS[bit];
            interval.0 = mid;
        } else {
            interval.1 = mid;
        }

        even = !even;
        if bit < BIT_WEIGHTS.len() - 1 {
            bit += 1;
        } else {
            hash.push(char::from(ALPHABET[usize::from(ch)]));
            bit = 0;
            ch = 0;
        }
    }

    Ok(hash)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_matches_classic_reference_vector() {
        assert_eq!(encode(57.649_11, 10.407_44, 6).unwrap(), "u4pruy");
        assert_eq!(encode(57.649_11, 10.407_44, 11).unwrap(), "u4pruydqqvj");
    }

    #[test]
    fn encode_known_cities() {
        assert_eq!(encode(40.712_8, -74.006_0, 7).unwrap(), "dr5regw");
        assert_eq!(encode(51.507_4, -0.127_8, 7).unwrap(), "gcpvj0d");
        assert_eq!(encode(37.774_9, -122.419_4, 12).unwrap(), "9q8yyk8ytpxr");
        assert_eq!(encode(-33.868_8, 151.209_3, 1).unwrap(), "r");
    }

    #[test]
    fn encode_midpoint_falls_into_lower_half() {
        assert_eq!(encode(0.0, 0.0, 5).unwrap(), "7zzzz");
    }

    #[test]
    fn encode_corners() {
        assert_eq!(encode(90.0, 180.0, 4).unwrap(), "zzzz");
        assert_eq!(encode(-90.0, -180.0, 4).unwrap(), "0000");
    }

    #[test]
    fn encode_length_and_alphabet_for_every_precision() {
        let points = [
            (0.0, 0.0),
            (45.5, -122.6),
            (-12.04, -77.03),
            (89.999, 179.999),
            (-89.999, -179.999),
        ];
        for (lat, lon) in points {
            for precision in 1..=MAX_PRECISION {
                let hash = encode(lat, lon, precision).unwrap();
                assert_eq!(hash.len(), precision, "({lat}, {lon}) @ {precision}");
                assert!(
                    hash.bytes().all(|b| ALPHABET.contains(&b)),
                    "unexpected symbol in {hash}"
                );
                assert_eq!(hash, encode(lat, lon, precision).unwrap());
            }
        }
    }

    #[test]
    fn encode_longer_precision_extends_shorter() {
        let short = encode(35.689_5, 139.691_7, 5).unwrap();
        let long = encode(35.689_5, 139.691_7, 10).unwrap();
        assert!(long.starts_with(&short), "{long} should extend {short}");
    }

    #[test]
    fn encode_rejects_out_of_range_coordinates() {
        assert!(matches!(
            encode(90.1, 0.0, 7),
            Err(GeohashError::LatitudeOutOfRange(_))
        ));
        assert!(matches!(
            encode(0.0, -180.5, 7),
            Err(GeohashError::LongitudeOutOfRange(_))
        ));
        assert!(matches!(
            encode(f64::NAN, 0.0, 7),
            Err(GeohashError::LatitudeOutOfRange(_))
        ));
        assert!(matches!(
            encode(0.0, f64::INFINITY, 7),
            Err(GeohashError::LongitudeOutOfRange(_))
        ));
    }

    #[test]
    fn encode_rejects_invalid_precision() {
        assert!(matches!(
            encode(10.0, 10.0, 0),
            Err(GeohashError::InvalidPrecision(0))
        ));
        assert!(matches!(
            encode(10.0, 10.0, 13),
            Err(GeohashError::InvalidPrecision(13))
        ));
    }
}
