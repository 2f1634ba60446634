//! Builds a model-view-projection chain and prints it in the layout a shader uniform expects.

use log::LevelFilter;
use mathgl::{batch_multiply, Matrix, Operand, Scalar, ScalarKind, Vector};

fn init_logger() {
    env_logger::Builder::new()
        .filter(Some(env!("CARGO_CRATE_NAME")), LevelFilter::Debug)
        .filter(Some("mathgl"), LevelFilter::Debug)
        .parse_default_env()
        .try_init()
        .ok();
}

#[rustfmt::skip]
fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> anyhow::Result<Matrix> {
    let f = 1.0 / (fov_y / 2.0).tan();
    let nf = 1.0 / (near - far);
    Ok(Matrix::from_slice(4, 4, &[
        f / aspect, 0.0, 0.0, 0.0,
        0.0, f, 0.0, 0.0,
        0.0, 0.0, (far + near) * nf, 2.0 * far * near * nf,
        0.0, 0.0, -1.0, 0.0,
    ])?)
}

fn look_at(eye: &Vector, center: &Vector, up: &Vector) -> anyhow::Result<Matrix> {
    let f = center.sub(eye)?.normalize();
    let s = f.cross(up)?.normalize();
    let u = s.cross(&f)?;

    let mut view = Matrix::identity(4, ScalarKind::F32);
    for col in 0..3 {
        view.set(0, col, s[col])?;
        view.set(1, col, u[col])?;
        view.set(2, col, f[col].neg()?)?;
    }
    view.set(0, 3, s.dot(eye)?.neg()?)?;
    view.set(1, 3, u.dot(eye)?.neg()?)?;
    view.set(2, 3, f.dot(eye)?)?;
    Ok(view)
}

#[rustfmt::skip]
fn model(angle: f32, offset: [f32; 3]) -> anyhow::Result<Matrix> {
    let (s, c) = angle.sin_cos();
    let [x, y, z] = offset;
    Ok(Matrix::from_slice(4, 4, &[
        c, 0.0, s, x,
        0.0, 1.0, 0.0, y,
        -s, 0.0, c, z,
        0.0, 0.0, 0.0, 1.0,
    ])?)
}

fn main() -> anyhow::Result<()> {
    init_logger();

    let projection = perspective(60f32.to_radians(), 16.0 / 9.0, 0.1, 100.0)?;
    let view = look_at(
        &Vector::from_slice(&[0.0f32, 2.0, 5.0]),
        &Vector::from_slice(&[0.0f32, 0.0, 0.0]),
        &Vector::from_slice(&[0.0f32, 1.0, 0.0]),
    )?;
    let model = model(30f32.to_radians(), [1.0, 0.0, -1.0])?;

    let mvp = batch_multiply(&[
        Operand::from(&projection),
        Operand::from(&view),
        Operand::from(&model),
    ])?;
    log::debug!("mvp = {mvp:?}");

    let uniform: [f32; 16] = mvp.as_col_major_array()?;
    println!("uniform mat4 (column-major): {uniform:?}");

    let origin = Vector::from_slice(&[0.0f32, 0.0, 0.0, 1.0]);
    let clip = mvp.mul(&origin)?.as_vector()?;
    let ndc = clip.scalar_mul(Scalar::F32(1.0 / clip[3].as_f32()))?;
    println!("model origin in NDC: {ndc}");

    Ok(())
}
