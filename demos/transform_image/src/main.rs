use std::path::PathBuf;

use argh::FromArgs;
use geowarp::{
    imgproc::interpolation::InterpolationMode,
    io::jpeg::write_image_jpeg_rgb8,
    pipeline::{process_upload_with_options, DEFAULT_DOWNLOAD_NAME},
    transform::{TransformOptions, TransformParams, FORMULAS},
};

/// Rotate, scale, flip and keystone an image and print the matrices
#[derive(FromArgs)]
struct Args {
    /// path to the input PNG or JPEG image
    #[argh(option, short = 'i')]
    input: PathBuf,

    /// path to the output image, JPEG if the extension says so
    #[argh(option, short = 'o', default = "PathBuf::from(DEFAULT_DOWNLOAD_NAME)")]
    output: PathBuf,

    /// JSON file with the transform parameters
    #[argh(option)]
    params: Option<PathBuf>,

    /// rotation angle in degrees, clockwise
    #[argh(option)]
    angle: Option<f64>,

    /// scale factor in (0, 3]
    #[argh(option)]
    scale: Option<f64>,

    /// mirror left to right
    #[argh(switch)]
    flip_horizontal: bool,

    /// mirror top to bottom
    #[argh(switch)]
    flip_vertical: bool,

    /// apply the keystone distortion
    #[argh(switch)]
    perspective: bool,

    /// use nearest neighbor instead of bilinear sampling
    #[argh(switch)]
    nearest: bool,

    /// also print the formula sheet
    #[argh(switch)]
    formulas: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    let mut params = match &args.params {
        Some(path) => serde_json::from_str::<TransformParams>(&std::fs::read_to_string(path)?)?,
        None => TransformParams::default(),
    };

    // explicit flags win over the parameter file
    if let Some(angle) = args.angle {
        params.angle = angle;
    }
    if let Some(scale) = args.scale {
        params.scale = scale;
    }
    params.flip_horizontal |= args.flip_horizontal;
    params.flip_vertical |= args.flip_vertical;
    params.perspective |= args.perspective;

    let options = TransformOptions {
        interpolation: if args.nearest {
            InterpolationMode::Nearest
        } else {
            InterpolationMode::Bilinear
        },
        ..Default::default()
    };

    let bytes = std::fs::read(&args.input)?;
    let out = process_upload_with_options(&bytes, &params, &options)?;

    let is_jpeg = args.output.extension().is_some_and(|ext| {
        ext.eq_ignore_ascii_case("jpg") || ext.eq_ignore_ascii_case("jpeg")
    });
    if is_jpeg {
        write_image_jpeg_rgb8(&args.output, &out.transformed, 95)?;
    } else {
        std::fs::write(&args.output, &out.png)?;
    }
    log::info!("wrote {}", args.output.display());

    println!(
        "{} -> {} ({})",
        args.input.display(),
        args.output.display(),
        out.original.size()
    );
    println!();
    print!("{}", out.report());

    if args.formulas {
        for formula in FORMULAS.iter() {
            println!();
            println!("{}", formula.title);
            println!("  {}", formula.latex);
            println!("  {}", formula.description);
        }
    }

    Ok(())
}
