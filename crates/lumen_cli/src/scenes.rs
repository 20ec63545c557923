//! Built-in demo scenes.

use std::sync::Arc;

use clap::ValueEnum;
use lumen_renderer::{
    Camera, CheckeredLambertian, Color, Cuboid, Dielectric, Group, Lambertian, Light, Metal,
    Point3, Quad, RenderResult, Sphere, Triangle, Vec3,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;

/// Seed for the random sphere field, so the layout is stable between runs.
const WEEKEND_LAYOUT_SEED: u64 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SceneName {
    /// Random sphere field with a glass, a checkered and a metal sphere
    Weekend,
    /// Five coloured quads around the origin
    Quads,
    /// Camera inside a box lit by a smaller emissive box
    Room,
    /// The Cornell box
    #[default]
    Cornell,
    /// Lit triangle fan over a ground plane
    Triangles,
}

/// A world plus the camera placement that frames it.
pub struct Scene {
    pub world: Group,
    pub camera: Camera,
}

impl Scene {
    fn new(world: Group, look_from: Point3, look_at: Point3, vfov: f64) -> Self {
        let camera = Camera::new()
            .with_position(look_from, look_at, Vec3::Y)
            .with_fov(vfov);
        Self { world, camera }
    }
}

pub fn build(name: SceneName) -> RenderResult<Scene> {
    log::debug!("Building scene {:?}", name);
    let scene = match name {
        SceneName::Weekend => weekend()?,
        SceneName::Quads => quads(),
        SceneName::Room => room(),
        SceneName::Cornell => cornell(),
        SceneName::Triangles => triangles()?,
    };
    log::info!("Scene {:?}: {} objects", name, scene.world.len());
    Ok(scene)
}

fn random_color(rng: &mut StdRng, min: f64, max: f64) -> Color {
    Color::new(
        rng.gen_range(min..max),
        rng.gen_range(min..max),
        rng.gen_range(min..max),
    )
}

fn weekend() -> RenderResult<Scene> {
    let mut rng = StdRng::seed_from_u64(WEEKEND_LAYOUT_SEED);
    let mut world = Group::new();

    world.push(Sphere::new(
        Point3::new(0.0, -1000.0, 0.0),
        1000.0,
        Arc::new(Lambertian::new(Color::splat(0.5))),
    ));

    for a in -11..11 {
        for b in -11..11 {
            let choose_mat: f64 = rng.gen();
            let center = Point3::new(
                a as f64 + 0.9 * rng.gen::<f64>(),
                0.2,
                b as f64 + 0.9 * rng.gen::<f64>(),
            );

            if (center - Point3::new(4.0, 0.2, 0.0)).length() <= 0.9 {
                continue;
            }

            if choose_mat < 0.8 {
                let albedo = random_color(&mut rng, 0.0, 1.0) * random_color(&mut rng, 0.0, 1.0);
                world.push(Sphere::new(center, 0.2, Arc::new(Lambertian::new(albedo))));
            } else if choose_mat < 0.95 {
                let albedo = random_color(&mut rng, 0.5, 1.0);
                world.push(Sphere::new(center, 0.2, Arc::new(Metal::new(albedo))));
            } else {
                world.push(Sphere::new(center, 0.2, Arc::new(Dielectric::new(1.5))));
            }
        }
    }

    world.push(Sphere::new(
        Point3::new(0.0, 1.0, 0.0),
        1.0,
        Arc::new(Dielectric::new(1.5)),
    ));
    world.push(Sphere::new(
        Point3::new(-4.0, 1.0, 0.0),
        1.0,
        Arc::new(CheckeredLambertian::new(
            0.1,
            Color::ZERO,
            Color::new(1.0, 0.0, 1.0),
        )?),
    ));
    world.push(Sphere::new(
        Point3::new(4.0, 1.0, 0.0),
        1.0,
        Arc::new(Metal::new(Color::new(0.7, 0.6, 0.5))),
    ));

    Ok(Scene::new(
        world,
        Point3::new(13.0, 2.0, 3.0),
        Point3::ZERO,
        20.0,
    ))
}

fn quads() -> Scene {
    let left_red = Arc::new(Lambertian::new(Color::new(1.0, 0.2, 0.2)));
    let back_green = Arc::new(Lambertian::new(Color::new(0.2, 1.0, 0.2)));
    let right_blue = Arc::new(Lambertian::new(Color::new(0.2, 0.2, 1.0)));
    let upper_orange = Arc::new(Lambertian::new(Color::new(1.0, 0.5, 0.0)));
    let lower_teal = Arc::new(Lambertian::new(Color::new(0.2, 0.8, 0.8)));

    let mut world = Group::new();
    world.push(Quad::new(
        Point3::new(-3.0, -2.0, 5.0),
        Vec3::new(0.0, 0.0, -4.0),
        Vec3::new(0.0, 4.0, 0.0),
        left_red,
    ));
    world.push(Quad::new(
        Point3::new(-2.0, -2.0, 0.0),
        Vec3::new(4.0, 0.0, 0.0),
        Vec3::new(0.0, 4.0, 0.0),
        back_green,
    ));
    world.push(Quad::new(
        Point3::new(3.0, -2.0, 1.0),
        Vec3::new(0.0, 0.0, 4.0),
        Vec3::new(0.0, 4.0, 0.0),
        right_blue,
    ));
    world.push(Quad::new(
        Point3::new(-2.0, 3.0, 1.0),
        Vec3::new(4.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, 4.0),
        upper_orange,
    ));
    world.push(Quad::new(
        Point3::new(-2.0, -3.0, 5.0),
        Vec3::new(4.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, -4.0),
        lower_teal,
    ));

    Scene::new(world, Point3::new(0.0, 0.0, 9.0), Point3::ZERO, 80.0)
}

fn room() -> Scene {
    let walls = Arc::new(Lambertian::new(Color::new(0.7, 0.6, 0.5)));
    let light = Arc::new(Light::new(Color::ONE));
    let red = Arc::new(Lambertian::new(Color::new(1.0, 0.0, 0.0)));

    let box_scale = 4.0;
    let lamp_offset = Vec3::new(0.0, box_scale * 1.2, 0.0);

    let mut world = Group::new();
    world.push(Cuboid::new(
        Point3::splat(-box_scale),
        Point3::splat(box_scale),
        walls,
    ));
    world.push(Cuboid::new(
        Point3::splat(-box_scale / 4.0) + lamp_offset,
        Point3::splat(box_scale / 4.0) + lamp_offset,
        light,
    ));
    world.push(Sphere::new(Point3::ZERO, 1.0, red));

    Scene::new(
        world,
        Point3::new(0.0, 0.0, 0.99 * box_scale),
        Point3::ZERO,
        90.0,
    )
}

fn cornell() -> Scene {
    let red = Arc::new(Lambertian::new(Color::new(0.65, 0.05, 0.05)));
    let white = Arc::new(Lambertian::new(Color::splat(0.73)));
    let green = Arc::new(Lambertian::new(Color::new(0.12, 0.45, 0.15)));
    let light = Arc::new(Light::new(Color::splat(15.0)));

    let mut world = Group::new();
    world.push(Quad::new(
        Point3::new(555.0, 0.0, 0.0),
        Vec3::new(0.0, 555.0, 0.0),
        Vec3::new(0.0, 0.0, 555.0),
        green,
    ));
    world.push(Quad::new(
        Point3::ZERO,
        Vec3::new(0.0, 555.0, 0.0),
        Vec3::new(0.0, 0.0, 555.0),
        red,
    ));
    world.push(Quad::new(
        Point3::new(343.0, 554.0, 332.0),
        Vec3::new(-130.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, -105.0),
        light,
    ));
    world.push(Quad::new(
        Point3::ZERO,
        Vec3::new(555.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, 555.0),
        white.clone(),
    ));
    world.push(Quad::new(
        Point3::splat(555.0),
        Vec3::new(-555.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, -555.0),
        white.clone(),
    ));
    world.push(Quad::new(
        Point3::new(0.0, 0.0, 555.0),
        Vec3::new(555.0, 0.0, 0.0),
        Vec3::new(0.0, 555.0, 0.0),
        white,
    ));

    Scene::new(
        world,
        Point3::new(278.0, 278.0, -800.0),
        Point3::new(278.0, 278.0, 0.0),
        40.0,
    )
}

fn triangles() -> RenderResult<Scene> {
    let ground = CheckeredLambertian::new(1.0, Color::splat(0.2), Color::splat(0.8))?;

    let mut world = Group::new();
    world.push(Quad::new(
        Point3::new(-5.0, 0.0, 5.0),
        Vec3::new(10.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, -10.0),
        Arc::new(ground),
    ));

    let colors = [
        Color::new(0.8, 0.3, 0.3),
        Color::new(0.3, 0.8, 0.3),
        Color::new(0.3, 0.3, 0.8),
        Color::new(0.8, 0.8, 0.3),
        Color::new(0.8, 0.3, 0.8),
    ];
    let apex = Point3::new(0.0, 2.0, 0.0);
    let radius = 1.5;
    let step = std::f64::consts::TAU / colors.len() as f64;

    for (i, color) in colors.iter().enumerate() {
        let a0 = i as f64 * step;
        let a1 = a0 + step;
        let p0 = Point3::new(radius * a0.cos(), 0.0, radius * a0.sin());
        let p1 = Point3::new(radius * a1.cos(), 0.0, radius * a1.sin());
        world.push(Triangle::new(p0, p1, apex, Arc::new(Lambertian::new(*color))));
    }

    world.push(Triangle::new(
        Point3::new(-1.0, 4.0, -1.0),
        Point3::new(1.0, 4.0, -1.0),
        Point3::new(0.0, 4.0, 1.0),
        Arc::new(Light::new(Color::splat(6.0))),
    ));
    world.push(Sphere::new(
        Point3::new(2.5, 0.75, 1.0),
        0.75,
        Arc::new(Metal::new(Color::new(0.8, 0.8, 0.9))),
    ));

    Ok(Scene::new(
        world,
        Point3::new(0.0, 3.0, 7.0),
        Point3::new(0.0, 1.0, 0.0),
        45.0,
    ))
}
