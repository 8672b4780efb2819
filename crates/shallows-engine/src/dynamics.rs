//! Right-hand sides of the momentum and height equations.
//!
//! Both variants read a boundary-consistent [`State`] snapshot and return
//! a [`Tendency`]. Coriolis terms use `f = f0 + beta * y` evaluated once at
//! the u and v points and held for the life of the engine.
//!
//! Linear:
//!
//! ```text
//! ∂u/∂t =  f v - g ∂h/∂x + nu ∆u - sponge(u)
//! ∂v/∂t = -f u - g ∂h/∂y + nu ∆v - sponge(v)
//! ∂h/∂t = -H (∂u/∂x + ∂v/∂y) + nu_phi ∆h - sponge(h)
//! ```
//!
//! Nonlinear (flux form for `phi`, advective form for momentum):
//!
//! ```text
//! ∂u/∂t = -∂phi/∂x + f v - u ∂u/∂x - v ∂u/∂y + nu ∆u - sponge(u)
//! ∂v/∂t = -∂phi/∂y - f u - u ∂v/∂x - v ∂v/∂y + nu ∆v - sponge(v)
//! ∂phi/∂t = -∇·(phi u) + nu_phi ∆phi [- sponge(phi)]
//! ```

use ndarray::{s, Array2};
use shallows_core::Staggering;
use shallows_grid::{average_x, average_y, interior, ArakawaCGrid};

use crate::config::{Dynamics, LinearParams, ModelConfig, NonlinearParams};
use crate::sponge::Sponge;
use crate::state::{State, Tendency};

/// Tendency assembly for one equation set.
#[derive(Clone, Debug)]
pub struct DynamicsEngine {
    variant: Dynamics,
    nu: f64,
    nu_phi: f64,
    coriolis_u: Array2<f64>,
    coriolis_v: Array2<f64>,
    sponge: Sponge,
}

impl DynamicsEngine {
    /// Precompute Coriolis arrays and the sponge for `grid`.
    pub fn new(config: &ModelConfig, grid: &ArakawaCGrid) -> Self {
        let (_, uy) = grid.coordinates(Staggering::U);
        let (_, vy) = grid.coordinates(Staggering::V);
        let coriolis_u = Array2::from_shape_fn(grid.interior_shape(Staggering::U), |(_, j)| {
            config.f0 + config.beta * uy[j]
        });
        let coriolis_v = Array2::from_shape_fn(grid.interior_shape(Staggering::V), |(_, j)| {
            config.f0 + config.beta * vy[j]
        });

        Self {
            variant: config.dynamics,
            nu: config.nu,
            nu_phi: config.resolved_nu_phi(),
            coriolis_u,
            coriolis_v,
            sponge: Sponge::new(config.ny, config.r),
        }
    }

    /// The equation set in use.
    pub fn variant(&self) -> Dynamics {
        self.variant
    }

    /// The sponge shared with damped tracers.
    pub fn sponge(&self) -> &Sponge {
        &self.sponge
    }

    /// `f` at u points, `(nx + 1, ny)`.
    pub fn coriolis_u(&self) -> &Array2<f64> {
        &self.coriolis_u
    }

    /// `f` at v points, `(nx, ny + 1)`.
    pub fn coriolis_v(&self) -> &Array2<f64> {
        &self.coriolis_v
    }

    /// Evaluate the dynamical tendency of a boundary-consistent state.
    pub fn tendency(&self, grid: &ArakawaCGrid, state: &State) -> Tendency {
        match self.variant {
            Dynamics::Linear(p) => self.linear(grid, state, p),
            Dynamics::Nonlinear(p) => self.nonlinear(grid, state, p),
        }
    }

    fn linear(&self, grid: &ArakawaCGrid, state: &State, p: LinearParams) -> Tendency {
        let (u, v, h) = (&state.u, &state.v, &state.phi);
        let (u_int, v_int, h_int) = (interior(u), interior(v), interior(h));
        let (u_at_v, v_at_u) = grid.uv_at_uv(u.view(), v.view());

        let mut h_rhs = grid.divergence(u_int, v_int) * -p.mean_depth;
        h_rhs.scaled_add(self.nu_phi, &grid.laplacian(h.view()));
        h_rhs -= &self.sponge.damp(h_int);

        let dhdx = grid.diff_x(h.view());
        let mut u_rhs = &self.coriolis_u * &v_at_u;
        u_rhs.scaled_add(-p.gravity, &dhdx.slice(s![.., 1..-1]));
        u_rhs.scaled_add(self.nu, &grid.laplacian(u.view()));
        u_rhs -= &self.sponge.damp(u_int);

        let dhdy = grid.diff_y(h.view());
        let mut v_rhs = -(&self.coriolis_v * &u_at_v);
        v_rhs.scaled_add(-p.gravity, &dhdy.slice(s![1..-1, ..]));
        v_rhs.scaled_add(self.nu, &grid.laplacian(v.view()));
        v_rhs -= &self.sponge.damp(v_int);

        Tendency {
            u: u_rhs,
            v: v_rhs,
            phi: h_rhs,
        }
    }

    fn nonlinear(&self, grid: &ArakawaCGrid, state: &State, p: NonlinearParams) -> Tendency {
        let (u, v, phi) = (&state.u, &state.v, &state.phi);
        let (u_int, v_int, phi_int) = (interior(u), interior(v), interior(phi));
        let (u_at_v, v_at_u) = grid.uv_at_uv(u.view(), v.view());

        // Height: flux divergence of phi u.
        let phi_at_u = average_x(phi.view()).slice_move(s![.., 1..-1]);
        let phi_at_v = average_y(phi.view()).slice_move(s![1..-1, ..]);
        let mut phi_rhs = -(grid.diff_x((&phi_at_u * &u_int).view())
            + grid.diff_y((&phi_at_v * &v_int).view()));
        phi_rhs.scaled_add(self.nu_phi, &grid.laplacian(phi.view()));
        if p.damp_height {
            phi_rhs -= &self.sponge.damp(phi_int);
        }

        // u momentum.
        let ubar_x = average_x(u.view()).slice_move(s![.., 1..-1]);
        let ubar_y = average_y(u.view()).slice_move(s![1..-1, ..]);
        let dphidx = grid.diff_x(phi.view());
        let u_du_dx = grid.diff_x(ubar_x.mapv(|x| x * x).view()) * 0.5;
        let v_du_dy = &v_at_u * &grid.diff_y(ubar_y.view());

        let mut u_rhs = &self.coriolis_u * &v_at_u;
        u_rhs -= &dphidx.slice(s![.., 1..-1]);
        u_rhs.scaled_add(self.nu, &grid.laplacian(u.view()));
        u_rhs -= &u_du_dx;
        u_rhs -= &v_du_dy;
        u_rhs -= &self.sponge.damp(u_int);

        // v momentum.
        let vbar_y = average_y(v.view()).slice_move(s![1..-1, ..]);
        let vbar_x = average_x(v.view()).slice_move(s![.., 1..-1]);
        let dphidy = grid.diff_y(phi.view());
        let u_dv_dx = &u_at_v * &grid.diff_x(vbar_x.view());
        let v_dv_dy = grid.diff_y(vbar_y.mapv(|x| x * x).view()) * 0.5;

        let mut v_rhs = -(&self.coriolis_v * &u_at_v);
        v_rhs -= &dphidy.slice(s![1..-1, ..]);
        v_rhs.scaled_add(self.nu, &grid.laplacian(v.view()));
        v_rhs -= &u_dv_dx;
        v_rhs -= &v_dv_dy;
        v_rhs -= &self.sponge.damp(v_int);

        Tendency {
            u: u_rhs,
            v: v_rhs,
            phi: phi_rhs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundary::Boundary;
    use shallows_test_utils::assert_close;

    fn setup(config: &ModelConfig) -> (ArakawaCGrid, DynamicsEngine) {
        let grid = config.grid().unwrap();
        let engine = DynamicsEngine::new(config, &grid);
        (grid, engine)
    }

    fn quiet(mut config: ModelConfig) -> ModelConfig {
        config.f0 = 0.0;
        config.beta = 0.0;
        config.nu = 0.0;
        config.r = 0.0;
        config
    }

    #[test]
    fn coriolis_follows_beta_plane() {
        let mut cfg = ModelConfig::nonlinear(4, 7);
        cfg.f0 = 1.0e-4;
        cfg.beta = 2.0e-11;
        let (grid, engine) = setup(&cfg);
        assert_eq!(engine.coriolis_u().dim(), (5, 7));
        assert_eq!(engine.coriolis_v().dim(), (4, 8));
        let (_, uy) = grid.coordinates(Staggering::U);
        for i in 0..5 {
            assert_eq!(engine.coriolis_u()[[i, 0]], 1.0e-4 + 2.0e-11 * uy[0]);
        }
        assert!(engine.coriolis_v()[[0, 0]] < engine.coriolis_v()[[0, 7]]);
    }

    #[test]
    fn tendency_shapes_match_interiors() {
        for cfg in [ModelConfig::linear(8, 9), ModelConfig::nonlinear(8, 9)] {
            let (grid, engine) = setup(&cfg);
            let t = engine.tendency(&grid, &State::zeros(&grid));
            assert!(t.check_shape(&grid, "dynamics").is_ok());
        }
    }

    #[test]
    fn resting_state_has_zero_tendency() {
        for cfg in [ModelConfig::linear(8, 9), ModelConfig::nonlinear(8, 9)] {
            let (grid, engine) = setup(&cfg);
            let t = engine.tendency(&grid, &State::zeros(&grid));
            assert_eq!(t, Tendency::zeros(&grid));
        }
    }

    #[test]
    fn uniform_geopotential_at_rest_is_steady() {
        let (grid, engine) = setup(&ModelConfig::nonlinear(8, 14));
        let mut state = State::zeros(&grid);
        state.phi.fill(10.0);
        Boundary::Periodic.apply_to_state(&mut state);
        let t = engine.tendency(&grid, &state);
        assert!(t.u.iter().all(|&x| x == 0.0));
        assert!(t.v.iter().all(|&x| x == 0.0));
        assert!(t.phi.iter().all(|&x| x.abs() < 1e-18));
    }

    #[test]
    fn linear_height_bump_pushes_fluid_outward() {
        let (grid, engine) = setup(&quiet(ModelConfig::linear(8, 9)));
        let mut state = State::zeros(&grid);
        state.phi_mut()[[4, 4]] = 1.0;
        Boundary::Periodic.apply_to_state(&mut state);
        let t = engine.tendency(&grid, &state);
        // u interior index i sits on the west face of phi cell i.
        assert!(t.u[[5, 4]] > 0.0);
        assert!(t.u[[4, 4]] < 0.0);
        assert!(t.v[[4, 5]] > 0.0);
        assert!(t.v[[4, 4]] < 0.0);
        assert!(t.phi.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn linear_convergence_raises_height() {
        let (grid, engine) = setup(&quiet(ModelConfig::linear(8, 9)));
        let mut state = State::zeros(&grid);
        // Eastward flow through the west face of cell (3, 3) only.
        state.u_mut()[[3, 3]] = 1.0;
        let t = engine.tendency(&grid, &state);
        assert!(t.phi[[3, 3]] > 0.0);
        assert!(t.phi[[2, 3]] < 0.0);
    }

    fn rotating(config: ModelConfig, f0: f64) -> ModelConfig {
        let mut cfg = quiet(config);
        cfg.f0 = f0;
        cfg
    }

    #[test]
    fn coriolis_turns_northward_flow_east() {
        for base in [ModelConfig::linear(4, 7), ModelConfig::nonlinear(4, 7)] {
            let (grid, engine) = setup(&rotating(base, 1.0e-4));
            let mut state = State::zeros(&grid);
            state.v.fill(2.0);
            let t = engine.tendency(&grid, &state);
            let expected = Array2::from_elem(t.u.dim(), 2.0e-4);
            assert_close(t.u.view(), expected.view(), 1e-18);
            assert!(t.v.iter().all(|&x| x.abs() < 1e-18));
        }
    }

    #[test]
    fn coriolis_turns_eastward_flow_south() {
        for base in [ModelConfig::linear(4, 7), ModelConfig::nonlinear(4, 7)] {
            let (grid, engine) = setup(&rotating(base, 1.0e-4));
            let mut state = State::zeros(&grid);
            state.u.fill(3.0);
            let t = engine.tendency(&grid, &state);
            let expected = Array2::from_elem(t.v.dim(), -3.0e-4);
            assert_close(t.v.view(), expected.view(), 1e-18);
            assert!(t.u.iter().all(|&x| x.abs() < 1e-18));
        }
    }

    #[test]
    fn nonlinear_cross_advection_of_sheared_u() {
        let (grid, engine) = setup(&quiet(ModelConfig::nonlinear(4, 7)));
        let mut state = State::zeros(&grid);
        // u grows northward by 0.1 per row, carried north at v = 2.
        state.u = Array2::from_shape_fn(state.u.dim(), |(_, j)| 0.1 * j as f64);
        state.v.fill(2.0);
        let t = engine.tendency(&grid, &state);

        let rate = -2.0 * 0.1 / grid.dy();
        let expected = Array2::from_elem(t.u.dim(), rate);
        assert_close(t.u.view(), expected.view(), 1e-12 * rate.abs());
    }

    #[test]
    fn nonlinear_self_advection_of_u_ramp() {
        let (grid, engine) = setup(&quiet(ModelConfig::nonlinear(4, 7)));
        let mut state = State::zeros(&grid);
        // Padded u[i, j] = 0.5 i, so -0.5 d(ubar^2)/dx at interior i
        // is -0.5 * 0.25 ((i + 1.5)^2 - (i + 0.5)^2) / dx.
        state.u = Array2::from_shape_fn(state.u.dim(), |(i, _)| 0.5 * i as f64);
        let t = engine.tendency(&grid, &state);

        let expected = Array2::from_shape_fn(t.u.dim(), |(i, _)| {
            let (a, b) = (i as f64 + 1.5, i as f64 + 0.5);
            -0.5 * 0.25 * (a * a - b * b) / grid.dx()
        });
        assert!(expected.iter().all(|&x| x < 0.0));
        assert_close(t.u.view(), expected.view(), 1e-20);
    }

    #[test]
    fn nonlinear_advection_of_v() {
        let (grid, engine) = setup(&quiet(ModelConfig::nonlinear(4, 7)));

        // v grows eastward by 0.1 per column, carried east at u = 2.
        let mut state = State::zeros(&grid);
        state.v = Array2::from_shape_fn(state.v.dim(), |(i, _)| 0.1 * i as f64);
        state.u.fill(2.0);
        let t = engine.tendency(&grid, &state);
        let rate = -2.0 * 0.1 / grid.dx();
        let expected = Array2::from_elem(t.v.dim(), rate);
        assert_close(t.v.view(), expected.view(), 1e-12 * rate.abs());

        // Padded v[i, j] = 0.5 j with no u.
        let mut state = State::zeros(&grid);
        state.v = Array2::from_shape_fn(state.v.dim(), |(_, j)| 0.5 * j as f64);
        let t = engine.tendency(&grid, &state);
        let expected = Array2::from_shape_fn(t.v.dim(), |(_, j)| {
            let (a, b) = (j as f64 + 1.5, j as f64 + 0.5);
            -0.5 * 0.25 * (a * a - b * b) / grid.dy()
        });
        assert_close(t.v.view(), expected.view(), 1e-20);
    }

    #[test]
    fn damp_height_flag_adds_sponge_to_geopotential() {
        let mut cfg = ModelConfig::nonlinear(8, 14);
        cfg.nu = 0.0;
        cfg.beta = 0.0;
        cfg.r = 1.0e-3;
        let (grid, plain) = setup(&cfg);
        cfg.dynamics = Dynamics::Nonlinear(NonlinearParams { damp_height: true });
        let (_, damped) = setup(&cfg);

        let mut state = State::zeros(&grid);
        state.phi.fill(10.0);
        Boundary::Walled.apply_to_state(&mut state);
        let a = plain.tendency(&grid, &state);
        let b = damped.tendency(&grid, &state);
        assert!(a.phi[[3, 0]].abs() < 1e-18);
        assert!((b.phi[[3, 0]] + 1.0e-2).abs() < 1e-15);
        assert_eq!(b.phi[[3, 7]], a.phi[[3, 7]]);
    }
}
