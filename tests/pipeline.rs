use approx::{assert_abs_diff_eq, assert_relative_eq};
use gpssi::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn disc_2d(size: usize, radius: f64) -> (Image, Mask) {
    let grid = Grid::new([size, size]).unwrap();
    let center = (size as f64 - 1.0) / 2.0;
    let mut image = Image::filled(grid.clone(), 0.0);
    let mut mask = Mask::filled(grid, false);
    for i in 0..size {
        for j in 0..size {
            let r = ((i as f64 - center).powi(2) + (j as f64 - center).powi(2)).sqrt();
            if r <= radius {
                mask.set(&[i, j], true);
                image.set(&[i, j], 1.0);
            }
        }
    }
    (image, mask)
}

#[test]
fn two_by_two_distance_map() {
    let grid = Grid::new([2, 2]).unwrap();
    let image = Image::filled(grid.clone(), 0.0);
    let mask = Mask::mask_from(grid, &[1, 0, 0, 0]).unwrap();
    let map = geodesic_map(&image, &mask, 0.0, 1, None).unwrap();
    assert_eq!(map.values()[..3], [0.0, 1.0, 1.0]);
    assert_abs_diff_eq!(map.values()[3], 2f64.sqrt(), epsilon = 1e-12);
}

#[test]
fn two_cell_full_covariance() {
    let kernel = RbfKernel::new(1.0, 1.0).unwrap().with_eps(1e-6).unwrap();
    let cov = build_covariance(&[2], &kernel, "full", None).unwrap();
    let dense = cov.to_dense();
    assert_relative_eq!(dense[(0, 0)], 1.0 + 1e-6, max_relative = 1e-15);
    assert_relative_eq!(dense[(0, 1)], (-0.5f64).exp(), max_relative = 1e-15);
    assert_eq!(dense[(0, 1)], dense[(1, 0)]);
}

#[test]
fn noise_free_signed_map_reproduces_mask_2d() {
    let (image, mask) = disc_2d(12, 3.5);
    let map = GeodesicDistance::new(GeodesicConfig::default())
        .unwrap()
        .compute_signed(&image, &mask)
        .unwrap();
    assert!(map.is_signed());

    let radius = heuristics::equal_volume_radius(&mask).unwrap();
    let kernel = RbfKernel::new(heuristics::amplitude_for_interval(radius), radius).unwrap();
    for repr in [CovarianceRepr::Full, CovarianceRepr::Kron] {
        let cov = CovarianceBuilder::new(mask.grid().clone())
            .representation(repr)
            .build(&kernel);
        let field = sample(&map, &cov, &vec![0.0; mask.len()]).unwrap();
        assert_eq!(field.to_mask(), mask, "representation {}", repr);
    }
}

#[test]
fn saturated_exterior_never_sampled_as_foreground() {
    // Körper: Zeilen 1 bis 4; Zeile 0 und 5 liegen außerhalb (Intensität 0).
    let grid = Grid::new([6, 6]).unwrap();
    let mut image = Image::filled(grid.clone(), 0.0);
    let mut mask = Mask::filled(grid.clone(), false);
    for i in 1..5 {
        for j in 0..6 {
            image.set(&[i, j], 1.0);
            if (2..4).contains(&i) && (1..5).contains(&j) {
                mask.set(&[i, j], true);
            }
        }
    }
    let map = GeodesicDistance::new(GeodesicConfig::default())
        .unwrap()
        .compute_signed(&image, &mask)
        .unwrap()
        .saturated_where(&image, |v| v == 0.0)
        .unwrap();
    let floor = map.min_value();
    for (d, &v) in map.values().iter().zip(image.data()) {
        if v == 0.0 {
            assert_eq!(*d, floor);
        }
    }

    let kernel = RbfKernel::new(0.01, 1.0).unwrap();
    let cov = build_covariance(&[6, 6], &kernel, "kron", None).unwrap();
    let sampler = Sampler::new(&cov).unwrap();
    let zero = sampler.sample(&map, &[0.0; 36]).unwrap();
    assert_eq!(zero.to_mask(), mask);

    let noise = standard_normal(&mut StdRng::seed_from_u64(9), 36);
    let noisy = sampler.sample(&map, &noise).unwrap().to_mask();
    for (&fg, &v) in noisy.data().iter().zip(image.data()) {
        if v == 0.0 {
            assert!(!fg);
        }
    }
}

#[test]
fn kron_and_full_samples_agree_without_nugget() {
    let (image, mask) = disc_2d(6, 1.5);
    let map = geodesic_map(&image, &mask, 0.5, 2, None).unwrap();
    let kernel = RbfKernel::new(2.0, 1.0).unwrap().with_eps(0.0).unwrap();
    let full = Sampler::new(&build_covariance(&[6, 6], &kernel, "full", None).unwrap()).unwrap();
    let kron = Sampler::new(&build_covariance(&[6, 6], &kernel, "kron", None).unwrap()).unwrap();

    let noise = standard_normal(&mut StdRng::seed_from_u64(17), 36);
    let a = full.sample(&map, &noise).unwrap();
    let b = kron.sample(&map, &noise).unwrap();
    for (x, y) in a.values().iter().zip(b.values()) {
        assert_abs_diff_eq!(*x, *y, epsilon = 1e-9);
    }
}

#[test]
fn volume_pipeline_3d() {
    let grid = Grid::with_spacing([6, 5, 5], [2.0, 1.0, 1.0]).unwrap();
    let mut image = Image::filled(grid.clone(), 0.0);
    let mut mask = Mask::filled(grid.clone(), false);
    for i in 0..6 {
        for j in 0..5 {
            for k in 0..5 {
                image.set(&[i, j, k], (i + j + k) as f64 * 0.1);
                if (2..4).contains(&i) && (1..4).contains(&j) && (1..4).contains(&k) {
                    mask.set(&[i, j, k], true);
                }
            }
        }
    }

    let engine = GeodesicDistance::new(GeodesicConfig::new().with_iterations(3)).unwrap();
    let unsigned = engine.compute(&image, &mask).unwrap();
    assert!(unsigned.values().iter().all(|d| *d >= 0.0));
    assert_eq!(unsigned.min_value(), 0.0);

    let map = engine.compute_signed(&image, &mask).unwrap();
    assert_eq!(map.threshold(0.0), mask);

    let kernel = RbfKernel::new(1.0, 1.5).unwrap();
    let cov = CovarianceBuilder::new(grid.clone()).build(&kernel);
    assert_eq!(cov.representation(), CovarianceRepr::Kron);
    if let Covariance::Kron(kron) = &cov {
        let sizes: Vec<usize> = kron.axis_matrices().iter().map(|m| m.nrows()).collect();
        assert_eq!(sizes, vec![6, 5, 5]);
    }

    let sampler = Sampler::new(&cov).unwrap();
    let mut rng = StdRng::seed_from_u64(2024);
    let noises: Vec<Vec<f64>> = (0..4).map(|_| standard_normal(&mut rng, grid.len())).collect();
    let samples = sampler.sample_many(&map, &noises).unwrap();
    assert_eq!(samples.len(), 4);
    for field in &samples {
        assert_eq!(field.grid(), &grid);
        assert_ne!(field.values(), map.values());
    }

    let again = sampler.sample_many(&map, &noises).unwrap();
    assert_eq!(samples, again);
}

#[test]
fn configs_load_from_json() {
    let config: GeodesicConfig =
        serde_json::from_str(r#"{"lambda":0.5,"iterations":4,"connectivity":"axial"}"#).unwrap();
    assert_eq!(config.connectivity, Connectivity::Axial);
    assert!(GeodesicDistance::new(config).is_ok());

    let kernel: RbfKernel = serde_json::from_str(r#"{"w0":2.0,"w1":3.0,"eps":0.0}"#).unwrap();
    assert_eq!(kernel.eps(), 0.0);

    let repr: CovarianceRepr = serde_json::from_str(r#""full""#).unwrap();
    assert_eq!(repr, CovarianceRepr::Full);

    let grid: Grid = serde_json::from_str(r#"{"shape":[4,3],"spacing":[0.5,1.0]}"#).unwrap();
    assert_eq!(grid.spacing(), &[0.5, 1.0]);
    assert!(serde_json::from_str::<Grid>(r#"{"shape":[4,0]}"#).is_err());
}

#[test]
fn errors_surface_through_public_api() {
    let kernel = RbfKernel::new(1.0, 1.0).unwrap();
    assert!(matches!(
        build_covariance(&[2, 2], &kernel, "banded", None),
        Err(GpssiError::UnknownRepresentation { .. })
    ));
    assert!(matches!(
        Grid::new([2, 2, 2, 2]),
        Err(GpssiError::InvalidDimensionality { dims: 4, .. })
    ));
    assert!(matches!(
        RbfKernel::new(1.0, 0.0),
        Err(GpssiError::InvalidConfiguration { .. })
    ));
}
