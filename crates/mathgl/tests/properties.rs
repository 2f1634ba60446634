use mathgl::{
    assert_approx_eq, batch_multiply, batch_multiply_with, BatchConfig, Error, Matrix, Operand,
    Scalar, ScalarKind, Vector,
};
use nalgebra::DMatrix;

const LOG: bool = false;

fn init_logger() {
    if LOG {
        env_logger::builder()
            .filter_module("mathgl", log::LevelFilter::Trace)
            .is_test(true)
            .try_init()
            .ok();
    }
}

fn random_f64s(rng: &mut fastrand::Rng, rows: usize, cols: usize) -> Matrix {
    let elements = (0..rows * cols)
        .map(|_| rng.f64() * 4.0 - 2.0)
        .collect::<Vec<_>>();
    Matrix::from_slice(rows, cols, &elements).unwrap()
}

fn random_i32s(rng: &mut fastrand::Rng, rows: usize, cols: usize) -> Matrix {
    let elements = (0..rows * cols)
        .map(|_| rng.i32(-10..=10))
        .collect::<Vec<_>>();
    Matrix::from_slice(rows, cols, &elements).unwrap()
}

fn to_nalgebra(m: &Matrix) -> DMatrix<f64> {
    let elements = m.as_slice().iter().map(|e| e.as_f64()).collect::<Vec<_>>();
    DMatrix::from_row_slice(m.rows(), m.cols(), &elements)
}

#[test]
fn add_sub_roundtrip() -> anyhow::Result<()> {
    let mut rng = fastrand::Rng::with_seed(0x5eed_0001);
    for _ in 0..50 {
        let (rows, cols) = (rng.usize(1..6), rng.usize(1..6));
        let a = random_i32s(&mut rng, rows, cols);
        let b = random_i32s(&mut rng, rows, cols);
        assert_eq!(a.add(&b)?.sub(&b)?, a);
        assert_eq!(a.add(&b)?, b.add(&a)?);
    }
    Ok(())
}

#[test]
fn identity_and_transpose() -> anyhow::Result<()> {
    let mut rng = fastrand::Rng::with_seed(0x5eed_0002);
    for _ in 0..50 {
        let (rows, cols) = (rng.usize(1..7), rng.usize(1..7));
        let m = random_i32s(&mut rng, rows, cols);
        assert_eq!(Matrix::identity(rows, ScalarKind::I32).mul(&m)?, m);
        assert_eq!(m.mul(&Matrix::identity(cols, ScalarKind::I32))?, m);
        assert_eq!(m.transpose().transpose(), m);

        // (AB)^T = B^T A^T
        let other_cols = rng.usize(1..5);
        let other = random_i32s(&mut rng, cols, other_cols);
        assert_eq!(
            m.mul(&other)?.transpose(),
            other.transpose().mul(&m.transpose())?
        );
    }
    Ok(())
}

#[test]
fn vector_products() -> anyhow::Result<()> {
    let mut rng = fastrand::Rng::with_seed(0x5eed_0003);
    for _ in 0..50 {
        let n = rng.usize(1..8);
        let a = random_i32s(&mut rng, 1, n).as_vector()?;
        let b = random_i32s(&mut rng, 1, n).as_vector()?;
        assert_eq!(a.dot(&b)?, b.dot(&a)?);
        assert_eq!(a.mul(&b)?.to_scalar()?, a.dot(&b)?);

        let outer = a.outer_product(&b)?;
        assert_eq!((outer.rows(), outer.cols()), (n, n));
        assert_eq!(outer.transpose(), b.outer_product(&a)?);
    }

    let x = Vector::from_slice(&[1.0, 0.0, 0.0]);
    let y = Vector::from_slice(&[0.0, 1.0, 0.0]);
    assert_eq!(x.cross(&y)?, Vector::from_slice(&[0.0, 0.0, 1.0]));
    Ok(())
}

#[test]
fn batch_matches_fold() -> anyhow::Result<()> {
    init_logger();
    let mut rng = fastrand::Rng::with_seed(0x5eed_0004);
    let configs = [
        BatchConfig::default(),
        BatchConfig::sequential(),
        BatchConfig::default().with_min_parallel_len(6),
    ];
    for len in 1..=12 {
        // Chain of matrices with matching inner dimensions.
        let dims = (0..=len).map(|_| rng.usize(1..5)).collect::<Vec<_>>();
        let mats = dims
            .windows(2)
            .map(|d| random_i32s(&mut rng, d[0], d[1]))
            .collect::<Vec<_>>();
        let expected = mats[1..]
            .iter()
            .try_fold(mats[0].clone(), |acc, m| acc.mul(m))?;
        let operands = mats.iter().map(Operand::from).collect::<Vec<_>>();

        assert_eq!(batch_multiply(&operands)?, expected);
        for config in &configs {
            assert_eq!(batch_multiply_with(config, &operands)?, expected);
        }

        // Same chain, led by a vector.
        let v = random_i32s(&mut rng, 1, dims[0]).as_vector()?;
        let expected = mats.iter().try_fold(v.as_matrix(true), |acc, m| acc.mul(m))?;
        let operands = [Operand::from(&v)]
            .into_iter()
            .chain(mats.iter().map(Operand::from))
            .collect::<Vec<_>>();
        for config in &configs {
            assert_eq!(batch_multiply_with(config, &operands)?, expected);
        }
    }
    Ok(())
}

#[test]
fn batch_mismatch() {
    let m = Matrix::identity(2, ScalarKind::F32);
    let v = Vector::from_slice(&[1.0f32, 2.0, 3.0]);
    let res = batch_multiply(&[(&m).into(), (&m).into(), (&v).into()]);
    assert!(matches!(res, Err(Error::DimensionMismatch { .. })));
}

#[test]
fn det_fixtures() -> anyhow::Result<()> {
    assert_eq!(Matrix::identity(4, ScalarKind::F64).det()?, 1.0);
    assert_eq!(Matrix::from_slice(2, 2, &[2, 0, 0, 3])?.det()?, 6.0);
    Ok(())
}

#[test]
fn det_matches_nalgebra() -> anyhow::Result<()> {
    init_logger();
    let mut rng = fastrand::Rng::with_seed(0x5eed_0005);
    for n in 1..=7 {
        for _ in 0..5 {
            let m = random_f64s(&mut rng, n, n);
            let expected = to_nalgebra(&m).determinant();
            assert_approx_eq!(Scalar::F64(m.det()?), Scalar::F64(expected), "{m:?}").abs(1e-8);
        }
    }
    Ok(())
}

#[test]
fn inverse_matches_nalgebra() -> anyhow::Result<()> {
    init_logger();
    let mut rng = fastrand::Rng::with_seed(0x5eed_0006);
    for n in 1..=6 {
        // Diagonally dominant, so the inverse is well-conditioned.
        let shift = Matrix::identity(n, ScalarKind::F64).scalar_mul(Scalar::F64(4.0 * n as f64))?;
        let m = random_f64s(&mut rng, n, n).add(&shift)?;
        let Some(expected) = to_nalgebra(&m).try_inverse() else {
            continue;
        };
        let inv = match m.inverse() {
            Ok(inv) => inv,
            Err(Error::Singular { .. }) => continue,
            Err(e) => return Err(e.into()),
        };
        let expected = Matrix::from_slice(n, n, expected.transpose().as_slice())?;
        assert_approx_eq!(inv, expected).abs(1e-6);
        assert_approx_eq!(inv.mul(&m)?, Matrix::identity(n, ScalarKind::F64)).abs(1e-6);
    }
    Ok(())
}

#[test]
fn orthogonal_inverse_of_rotations() -> anyhow::Result<()> {
    let mut rng = fastrand::Rng::with_seed(0x5eed_0007);
    for _ in 0..20 {
        let (sa, ca) = (rng.f64() * 6.0).sin_cos();
        let (sb, cb) = (rng.f64() * 6.0).sin_cos();
        #[rustfmt::skip]
        let rz = Matrix::from_slice(3, 3, &[
            ca, -sa, 0.0,
            sa, ca, 0.0,
            0.0, 0.0, 1.0,
        ])?;
        #[rustfmt::skip]
        let rx = Matrix::from_slice(3, 3, &[
            1.0, 0.0, 0.0,
            0.0, cb, -sb,
            0.0, sb, cb,
        ])?;
        let rot = rz.mul(&rx)?;
        let id = Matrix::identity(3, ScalarKind::F64);
        assert_approx_eq!(rot.orthogonal_inverse()?.mul(&rot)?, id).abs(1e-9);
        assert_approx_eq!(rot.orthogonal_inverse()?, rot.inverse()?).abs(1e-9);
    }
    Ok(())
}

#[test]
fn kind_mismatch() {
    let a = Matrix::identity(2, ScalarKind::F32);
    let b = Matrix::identity(2, ScalarKind::F64);
    let expected = Err(Error::KindMismatch {
        expected: ScalarKind::F32,
        found: ScalarKind::F64,
    });
    assert_eq!(a.mul(&b), expected);
    assert_eq!(a.add(&b), expected);
    assert_eq!(a.scalar_mul(Scalar::F64(2.0)), expected);
}

#[test]
fn uniform_upload() -> anyhow::Result<()> {
    let m = Matrix::from_fn(4, 4, ScalarKind::F32, |i, j| Scalar::F32((i * 4 + j) as f32))?;
    let row_major: [f32; 16] = m.as_array()?;
    let col_major: [f32; 16] = m.as_col_major_array()?;
    assert_eq!(row_major[1], 1.0);
    assert_eq!(col_major[1], 4.0);
    assert_eq!(m.transpose().as_array::<f32, 16>()?, col_major);
    assert_eq!(m.to_bytes()?, ne_bytes(&row_major));
    Ok(())
}

fn ne_bytes(values: &[f32]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_ne_bytes()).collect()
}
