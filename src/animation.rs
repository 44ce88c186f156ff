// requestAnimationFrame loop and window event wiring.
// The scene is shared between the handle and the JS callbacks through an
// `Rc<RefCell<_>>`. Everything runs on the browser's main thread and the
// callbacks never nest, so borrows are short and never contended.

use crate::canvas::{self, CanvasSurface};
use crate::error::NetworkError;
use crate::renderer::Renderer;
use crate::simulation::Simulation;
#[cfg(feature = "timing")]
use crate::utils::Timer;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{MouseEvent, Window};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LoopState {
    Stopped,
    Running,
    Disposed,
}

pub struct Scene {
    pub simulation: Simulation,
    pub renderer: Renderer<CanvasSurface>,
}

impl Scene {
    pub fn frame(&mut self) {
        #[cfg(feature = "timing")]
        let _timer = Timer::new("NetworkBackground::frame");
        if let Err(e) = self.renderer.draw_frame(&mut self.simulation) {
            log::error!("frame failed: {}", e);
        }
    }

    pub fn sync_size(&mut self, window: &Window) -> Result<(), NetworkError> {
        let (width, height) = canvas::window_size(window)?;
        self.renderer.surface().set_size(width as u32, height as u32);
        self.simulation.resize(width, height);
        Ok(())
    }
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

pub struct AnimationLoop {
    window: Window,
    scene: Rc<RefCell<Scene>>,
    state: Rc<Cell<LoopState>>,
    frame_id: Rc<Cell<Option<i32>>>,
    frame_callback: FrameCallback,
    on_resize: Option<Closure<dyn FnMut()>>,
    on_mouse_move: Option<Closure<dyn FnMut(MouseEvent)>>,
}

impl AnimationLoop {
    // Wires up the frame callback and the window listeners. The loop starts
    // out stopped.
    pub fn new(window: Window, scene: Scene) -> Result<AnimationLoop, NetworkError> {
        let mut animation = AnimationLoop {
            window,
            scene: Rc::new(RefCell::new(scene)),
            state: Rc::new(Cell::new(LoopState::Stopped)),
            frame_id: Rc::new(Cell::new(None)),
            frame_callback: Rc::new(RefCell::new(None)),
            on_resize: None,
            on_mouse_move: None,
        };
        animation.build_frame_callback();
        // On error the loop is dropped here, which detaches the canvas again
        animation.listen()?;
        Ok(animation)
    }

    // The callback holds an Rc to its own slot so it can reschedule itself;
    // dispose() empties the slot to break the cycle
    fn build_frame_callback(&mut self) {
        let callback = self.frame_callback.clone();
        let window = self.window.clone();
        let scene = self.scene.clone();
        let state = self.state.clone();
        let frame_id = self.frame_id.clone();
        let closure = Closure::wrap(Box::new(move || {
            frame_id.set(None);
            if state.get() != LoopState::Running {
                return;
            }
            scene.borrow_mut().frame();
            request_frame(&window, &callback, &frame_id);
        }) as Box<dyn FnMut()>);
        *self.frame_callback.borrow_mut() = Some(closure);
    }

    fn listen(&mut self) -> Result<(), NetworkError> {
        let on_resize = {
            let window = self.window.clone();
            let scene = self.scene.clone();
            Closure::wrap(Box::new(move || {
                if let Err(e) = scene.borrow_mut().sync_size(&window) {
                    log::error!("resize failed: {}", e);
                }
            }) as Box<dyn FnMut()>)
        };
        self.window
            .add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())
            .map_err(|e| NetworkError::from_js("add resize listener", e))?;
        self.on_resize = Some(on_resize);

        let on_mouse_move = {
            let scene = self.scene.clone();
            Closure::wrap(Box::new(move |event: MouseEvent| {
                scene
                    .borrow_mut()
                    .simulation
                    .set_mouse(event.client_x() as f64, event.client_y() as f64);
            }) as Box<dyn FnMut(MouseEvent)>)
        };
        self.window
            .add_event_listener_with_callback("mousemove", on_mouse_move.as_ref().unchecked_ref())
            .map_err(|e| NetworkError::from_js("add mousemove listener", e))?;
        self.on_mouse_move = Some(on_mouse_move);
        Ok(())
    }

    pub fn state(&self) -> LoopState {
        self.state.get()
    }

    pub fn start(&self) {
        if self.state.get() != LoopState::Stopped {
            return;
        }
        self.state.set(LoopState::Running);
        request_frame(&self.window, &self.frame_callback, &self.frame_id);
    }

    pub fn stop(&self) {
        if self.state.get() != LoopState::Running {
            return;
        }
        self.state.set(LoopState::Stopped);
        if let Some(id) = self.frame_id.take() {
            if let Err(e) = self.window.cancel_animation_frame(id) {
                log::warn!("{}", NetworkError::from_js("cancel_animation_frame", e));
            }
        }
    }

    // Runs exactly one frame right now, whether or not the loop is running.
    pub fn tick(&self) -> Result<(), NetworkError> {
        self.with_scene(|scene| scene.frame())
    }

    pub fn with_scene<R>(&self, f: impl FnOnce(&mut Scene) -> R) -> Result<R, NetworkError> {
        if self.state.get() == LoopState::Disposed {
            return Err(NetworkError::Disposed);
        }
        Ok(f(&mut self.scene.borrow_mut()))
    }

    pub fn resize(&self) -> Result<(), NetworkError> {
        let window = &self.window;
        self.with_scene(|scene| scene.sync_size(window))?
    }

    // Stops the loop, removes the listeners and the canvas. Idempotent.
    pub fn dispose(&mut self) {
        if self.state.get() == LoopState::Disposed {
            return;
        }
        self.stop();
        self.state.set(LoopState::Disposed);

        if let Some(on_resize) = self.on_resize.take() {
            if let Err(e) = self
                .window
                .remove_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())
            {
                log::warn!("{}", NetworkError::from_js("remove resize listener", e));
            }
        }
        if let Some(on_mouse_move) = self.on_mouse_move.take() {
            if let Err(e) = self.window.remove_event_listener_with_callback(
                "mousemove",
                on_mouse_move.as_ref().unchecked_ref(),
            ) {
                log::warn!("{}", NetworkError::from_js("remove mousemove listener", e));
            }
        }
        self.frame_callback.borrow_mut().take();
        self.scene.borrow().renderer.surface().detach();
        log::info!("network background disposed");
    }
}

impl Drop for AnimationLoop {
    fn drop(&mut self) {
        self.dispose();
    }
}

fn request_frame(window: &Window, callback: &FrameCallback, frame_id: &Cell<Option<i32>>) {
    if let Some(closure) = callback.borrow().as_ref() {
        match window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            Ok(id) => frame_id.set(Some(id)),
            Err(e) => log::error!("{}", NetworkError::from_js("request_animation_frame", e)),
        }
    }
}
