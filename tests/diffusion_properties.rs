use diffmatch::{
    Direction, DiffusionWeight, LuvRange, NoProgress, RangeDiffusionSlice, RangeGapDistance,
    RangeImage,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_image(rng: &mut StdRng, width: usize, height: usize, masked: f64) -> RangeImage {
    RangeImage::from_fn(width, height, |_, _| {
        if rng.random_bool(masked) {
            return None;
        }
        let l = rng.random_range(0.0f32..100.0);
        let u = rng.random_range(-20.0f32..20.0);
        let v = rng.random_range(-20.0f32..20.0);
        let spread = rng.random_range(0.0f32..4.0);
        Some(LuvRange::new([l, u, v], [l + spread, u, v + spread]))
    })
    .unwrap()
}

fn weights_for(img: &RangeImage, dist_mult: f32) -> DiffusionWeight {
    let mut w = DiffusionWeight::new();
    w.create(img, &RangeGapDistance, dist_mult, &mut NoProgress);
    w
}

#[test]
fn weights_are_normalized_or_isolated() {
    let mut rng = StdRng::seed_from_u64(0xD1FF);
    for _ in 0..8 {
        let img = random_image(&mut rng, 13, 9, 0.3);
        let w = weights_for(&img, 0.05);
        for y in 0..img.height() {
            for x in 0..img.width() {
                let ws = w.weights(x, y);
                assert!(ws.iter().all(|&v| (0.0..=1.0).contains(&v)));
                let sum: f32 = ws.iter().sum();
                if !img.valid(x, y) {
                    assert_eq!(sum, 0.0);
                    continue;
                }
                let has_neighbor = Direction::ALL.iter().any(|d| {
                    let (dx, dy) = d.step();
                    img.valid_ext(x as isize + dx, y as isize + dy)
                });
                if has_neighbor {
                    assert!((sum - 1.0).abs() < 1e-5, "sum {sum} at ({x}, {y})");
                } else {
                    assert_eq!(sum, 0.0);
                }
                for dir in Direction::ALL {
                    let (dx, dy) = dir.step();
                    if !img.valid_ext(x as isize + dx, y as isize + dy) {
                        assert_eq!(w.get(x, y, dir), 0.0);
                    }
                }
            }
        }
    }
}

#[test]
fn farther_neighbor_gets_more_weight() {
    let img = RangeImage::from_fn(3, 1, |x, _| {
        let l = [0.0, 1.0, 10.0][x];
        Some(LuvRange::point(l, 0.0, 0.0))
    })
    .unwrap();
    let w = weights_for(&img, 1.0);
    assert!(w.get(1, 0, Direction::PosX) > w.get(1, 0, Direction::NegX));
    let ratio = w.get(1, 0, Direction::PosX) / w.get(1, 0, Direction::NegX);
    assert!((ratio - 8.0f32.exp()).abs() / 8.0f32.exp() < 1e-4);
    assert_eq!(w.get(0, 0, Direction::PosX), 1.0);
}

#[test]
fn fully_masked_image_diffuses_nothing() {
    let img = RangeImage::with_mask(vec![LuvRange::point(5.0, 0.0, 0.0); 20], vec![0; 20], 5, 4)
        .unwrap();
    let w = weights_for(&img, 1.0);
    let mut slice = RangeDiffusionSlice::new();
    for y in 0..4 {
        slice.create(y, 3, &img, &w, &mut NoProgress);
        for x in 0..5 {
            assert!(slice.window(x).iter().all(|&v| v == 0.0));
        }
    }
}

#[test]
fn slice_is_zero_outside_diamond() {
    let mut rng = StdRng::seed_from_u64(7);
    let img = random_image(&mut rng, 10, 6, 0.0);
    let w = weights_for(&img, 0.1);
    let mut slice = RangeDiffusionSlice::new();
    slice.create(2, 2, &img, &w, &mut NoProgress);
    assert_eq!(slice.steps(), 2);
    assert_eq!(slice.y(), 2);
    for x in 0..10 {
        assert_eq!(slice.get(x, 2, 1), 0.0);
        assert_eq!(slice.get(x, -3, 0), 0.0);
        assert_eq!(slice.get(x, 0, 5), 0.0);
    }
}

#[test]
fn slice_mass_is_one_or_mostly_lost() {
    let mut rng = StdRng::seed_from_u64(0x51CE);
    let mut slice = RangeDiffusionSlice::new();
    for steps in 1..=4 {
        let img = random_image(&mut rng, 11, 7, 0.35);
        let w = weights_for(&img, 0.05);
        let s = steps as isize;
        for y in 0..img.height() {
            slice.create(y, steps, &img, &w, &mut NoProgress);
            for x in 0..img.width() {
                let mut sum = 0.0f32;
                for v in -s..=s {
                    for u in -s..=s {
                        let p = slice.get(x, u, v);
                        assert!(p >= 0.0);
                        if p > 0.0 {
                            assert!(img.valid_ext(x as isize + u, y as isize + v));
                        }
                        sum += p;
                    }
                }
                if !img.valid(x, y) {
                    assert_eq!(sum, 0.0);
                } else {
                    assert!(
                        (sum - 1.0).abs() < 1e-4 || sum <= 0.5 + 1e-6,
                        "mass {sum} at ({x}, {y}) with {steps} steps"
                    );
                }
            }
        }
    }
}

#[test]
fn slice_mass_is_conserved_without_mask() {
    let mut rng = StdRng::seed_from_u64(99);
    let img = random_image(&mut rng, 8, 8, 0.0);
    let w = weights_for(&img, 0.02);
    let mut slice = RangeDiffusionSlice::new();
    slice.create(4, 3, &img, &w, &mut NoProgress);
    for x in 0..8 {
        let sum: f32 = slice.window(x).iter().sum();
        assert!((sum - 1.0).abs() < 1e-4);
    }
}

#[test]
fn slice_reuse_across_step_counts() {
    let mut rng = StdRng::seed_from_u64(3);
    let img = random_image(&mut rng, 9, 5, 0.0);
    let w = weights_for(&img, 0.1);

    let mut reused = RangeDiffusionSlice::new();
    reused.create(1, 4, &img, &w, &mut NoProgress);
    reused.create(3, 2, &img, &w, &mut NoProgress);

    let mut fresh = RangeDiffusionSlice::new();
    fresh.create(3, 2, &img, &w, &mut NoProgress);

    for x in 0..9 {
        assert_eq!(reused.window(x), fresh.window(x));
    }
}
