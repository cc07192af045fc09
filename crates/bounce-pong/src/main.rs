//! Ball-in-a-box demo: a ball bounces between four edge walls and a
//! player paddle. `A`/`D` move the paddle while held, `P` pauses,
//! closing the window quits.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use anyhow::Result;

use bounce_engine::{
    Category, Config, Contact, Event, Key, Rect, Scheduler, Vec2, collide, logging,
};

const WALL_SIZE: f32 = 10.0;
/// Ball speed along each axis, logical px/s.
const BALL_SPEED: f32 = 400.0;
/// Paddle speed while a key is held, logical px/s.
const PADDLE_SPEED: f32 = 500.0;
/// First-frame dt includes window/GPU bring-up; clamp before integrating.
const MAX_STEP: Duration = Duration::from_millis(100);

/// Wall slots; `PLAYER` is the movable paddle.
const PLAYER: usize = 0;
const TOP: usize = 1;
const RIGHT: usize = 2;
const BOTTOM: usize = 3;
const LEFT: usize = 4;

#[derive(Debug, Default, Copy, Clone)]
struct Body {
    rect: Rect,
    vel: Vec2,
}

#[derive(Debug)]
struct World {
    walls: [Body; 5],
    ball: Body,
    paused: bool,
}

impl World {
    fn new() -> Self {
        let mut walls = [Body::default(); 5];
        for wall in &mut walls {
            wall.rect.w = WALL_SIZE;
            wall.rect.h = WALL_SIZE;
        }

        Self {
            walls,
            ball: Body {
                rect: Rect::new(WALL_SIZE, WALL_SIZE, WALL_SIZE, WALL_SIZE),
                vel: Vec2::new(BALL_SPEED, BALL_SPEED),
            },
            paused: false,
        }
    }

    /// Re-derives wall placement from the surface size. Runs before the
    /// first frame (priming resize) and on every native resize.
    fn layout(&mut self, w: f32, h: f32) {
        self.walls[PLAYER].rect.y = h * (5.0 / 6.0);
        self.walls[PLAYER].rect.w = w / 8.0;
        self.walls[PLAYER].rect.h = WALL_SIZE;

        self.walls[TOP].rect.w = w;
        self.walls[BOTTOM].rect.w = w;
        self.walls[BOTTOM].rect.y = h - WALL_SIZE;
        self.walls[RIGHT].rect.x = w - WALL_SIZE;
        self.walls[LEFT].rect.h = h;
        self.walls[RIGHT].rect.h = h;
    }
}

fn main() -> Result<()> {
    logging::init_logging(Default::default());

    let mut sched = Scheduler::new(Config {
        title: "bounce pong".to_string(),
        ..Default::default()
    });
    let keyboard = sched.keyboard();
    let world = Rc::new(RefCell::new(World::new()));

    // Wall placement follows the surface size.
    {
        let world = world.clone();
        sched.subscribe(Category::Resize, move |event| {
            let Event::SurfaceResize(resize) = event else {
                return;
            };
            world.borrow_mut().layout(resize.w, resize.h);
        });
    }

    // Ball physics: collide against every wall, flip velocity, integrate.
    {
        let world = world.clone();
        sched.subscribe(Category::Frame, move |event| {
            let Event::FrameTick(tick) = event else {
                return;
            };
            let dt = tick.dt.min(MAX_STEP).as_secs_f32();

            let mut world = world.borrow_mut();
            if world.paused {
                return;
            }

            for i in 0..world.walls.len() {
                match collide(world.ball.rect, world.walls[i].rect) {
                    Some(Contact::Up) => world.ball.vel.y = -BALL_SPEED,
                    Some(Contact::Down) => world.ball.vel.y = BALL_SPEED,
                    Some(Contact::Left) => world.ball.vel.x = BALL_SPEED,
                    Some(Contact::Right) => world.ball.vel.x = -BALL_SPEED,
                    None => {}
                }
            }

            let vel = world.ball.vel;
            world.ball.rect.x += vel.x * dt;
            world.ball.rect.y += vel.y * dt;
        });
    }

    // Paddle movement polls the held-key table; runs after the physics
    // subscriber every tick (subscription order is invocation order).
    {
        let world = world.clone();
        let keyboard = keyboard.clone();
        sched.subscribe(Category::Frame, move |event| {
            let Event::FrameTick(tick) = event else {
                return;
            };
            let dt = tick.dt.min(MAX_STEP).as_secs_f32();

            let mut world = world.borrow_mut();
            if world.paused {
                return;
            }

            if keyboard.is_down(Key::A) {
                world.walls[PLAYER].rect.x -= PADDLE_SPEED * dt;
            }
            if keyboard.is_down(Key::D) {
                world.walls[PLAYER].rect.x += PADDLE_SPEED * dt;
            }
        });
    }

    // Pause toggle.
    {
        let world = world.clone();
        sched.subscribe(Category::Key, move |event| {
            let Event::KeyPress(press) = event else {
                return;
            };
            if press.key == Key::P {
                let mut world = world.borrow_mut();
                world.paused = !world.paused;
                log::info!("{}", if world.paused { "paused" } else { "resumed" });
            }
        });
    }

    let render_world = world.clone();
    sched.run(move |surface| {
        let world = render_world.borrow();

        surface.set_color(0, 0, 0, 255);
        surface.clear();

        surface.set_color(255, 255, 255, 255);
        surface.draw_rect(world.ball.rect);
        for wall in &world.walls {
            surface.draw_rect(wall.rect);
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_places_walls_against_the_surface() {
        let mut world = World::new();
        world.layout(800.0, 600.0);

        assert_eq!(world.walls[PLAYER].rect.y, 500.0);
        assert_eq!(world.walls[PLAYER].rect.w, 100.0);
        assert_eq!(world.walls[TOP].rect.w, 800.0);
        assert_eq!(world.walls[BOTTOM].rect.y, 590.0);
        assert_eq!(world.walls[RIGHT].rect.x, 790.0);
        assert_eq!(world.walls[LEFT].rect.h, 600.0);
        assert_eq!(world.walls[RIGHT].rect.h, 600.0);
    }

    #[test]
    fn ball_bounces_off_the_top_wall() {
        let mut world = World::new();
        world.layout(800.0, 600.0);

        // Drive the ball into the top wall and check the velocity flip
        // matches the contact polarity (ball below wall => pushed down).
        world.ball.rect = Rect::new(100.0, 8.0, WALL_SIZE, WALL_SIZE);
        world.ball.vel = Vec2::new(BALL_SPEED, -BALL_SPEED);

        let contact = collide(world.ball.rect, world.walls[TOP].rect);
        assert_eq!(contact, Some(Contact::Down));
    }
}
