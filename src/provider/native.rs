//! Runtime binding to the system GSS-API library.
//!
//! The library is opened with `dlopen` and the core symbols are required. The
//! RFC 5801 and RFC 5587 entry points are looked up with `dlsym`; an
//! extension is bound only when every one of its symbols resolves, so a
//! provider built without an extension reports it as unavailable instead of
//! failing to load.
//!
//! Every OID set, buffer and imported name the library hands out is owned by
//! a guard that releases it on drop, including on error paths.

use super::{
    AttributeInquiry, ExtensionHandle, MechAttrInfo, MechAttrs, MechProvider, Name, SaslNameInfo,
    SaslNaming,
};
use crate::error::{ProviderError, status};
use crate::oid::{Oid, OidSet};
use crate::registry::Extension;
use anyhow::{Context, Result, anyhow, bail};
use libc::{c_int, c_void, size_t};
use std::ffi::{CStr, CString};
use std::path::Path;
use std::ptr;
use std::sync::Arc;
use tracing::debug;

#[cfg(target_os = "macos")]
const DEFAULT_LIBRARIES: &[&str] = &["libgssapi_krb5.dylib", "libgssapi_krb5.2.2.dylib"];
#[cfg(not(target_os = "macos"))]
const DEFAULT_LIBRARIES: &[&str] = &["libgssapi_krb5.so.2", "libgssapi.so.3", "libgssapi_krb5.so"];

const GSS_C_GSS_CODE: c_int = 1;
const GSS_C_MECH_CODE: c_int = 2;

type OmUint32 = u32;

#[repr(C)]
struct GssOidDesc {
    length: OmUint32,
    elements: *mut c_void,
}

#[repr(C)]
struct GssOidSetDesc {
    count: size_t,
    elements: *mut GssOidDesc,
}

#[repr(C)]
struct GssBufferDesc {
    length: size_t,
    value: *mut c_void,
}

type GssOid = *mut GssOidDesc;
type GssOidSet = *mut GssOidSetDesc;
type GssName = *mut c_void;

type IndicateMechsFn = unsafe extern "C" fn(*mut OmUint32, *mut GssOidSet) -> OmUint32;
type InquireMechsForNameFn =
    unsafe extern "C" fn(*mut OmUint32, GssName, *mut GssOidSet) -> OmUint32;
type InquireNamesForMechFn =
    unsafe extern "C" fn(*mut OmUint32, GssOid, *mut GssOidSet) -> OmUint32;
type ImportNameFn =
    unsafe extern "C" fn(*mut OmUint32, *mut GssBufferDesc, GssOid, *mut GssName) -> OmUint32;
type ReleaseNameFn = unsafe extern "C" fn(*mut OmUint32, *mut GssName) -> OmUint32;
type ReleaseOidSetFn = unsafe extern "C" fn(*mut OmUint32, *mut GssOidSet) -> OmUint32;
type ReleaseBufferFn = unsafe extern "C" fn(*mut OmUint32, *mut GssBufferDesc) -> OmUint32;
type DisplayStatusFn = unsafe extern "C" fn(
    *mut OmUint32,
    OmUint32,
    c_int,
    GssOid,
    *mut OmUint32,
    *mut GssBufferDesc,
) -> OmUint32;
type InquireSaslnameForMechFn = unsafe extern "C" fn(
    *mut OmUint32,
    GssOid,
    *mut GssBufferDesc,
    *mut GssBufferDesc,
    *mut GssBufferDesc,
) -> OmUint32;
type InquireMechForSaslnameFn =
    unsafe extern "C" fn(*mut OmUint32, *mut GssBufferDesc, *mut GssOid) -> OmUint32;
type InquireAttrsForMechFn =
    unsafe extern "C" fn(*mut OmUint32, GssOid, *mut GssOidSet, *mut GssOidSet) -> OmUint32;
type IndicateMechsByAttrsFn = unsafe extern "C" fn(
    *mut OmUint32,
    GssOidSet,
    GssOidSet,
    GssOidSet,
    *mut GssOidSet,
) -> OmUint32;
type DisplayMechAttrFn = unsafe extern "C" fn(
    *mut OmUint32,
    GssOid,
    *mut GssBufferDesc,
    *mut GssBufferDesc,
    *mut GssBufferDesc,
) -> OmUint32;

/// Resolve `$name` in `$lib` as a function pointer of type `$ty`.
macro_rules! bind_symbol {
    ($lib:expr, $name:literal, $ty:ty) => {
        $lib.symbol($name)
            // SAFETY: the symbol is the GSS-API entry point declared by `$ty`.
            .map(|sym| unsafe { std::mem::transmute::<*mut c_void, $ty>(sym) })
    };
}

/// An open `dlopen` handle, closed on drop.
struct Library {
    handle: *mut c_void,
    name: String,
}

// SAFETY: the handle is only passed to dlsym/dlclose, which are thread-safe.
unsafe impl Send for Library {}
unsafe impl Sync for Library {}

impl Library {
    fn open(name: &str) -> Result<Self> {
        let c_name = CString::new(name).with_context(|| format!("library name {name:?}"))?;
        // SAFETY: c_name is a valid NUL-terminated string.
        let handle = unsafe { libc::dlopen(c_name.as_ptr(), libc::RTLD_NOW | libc::RTLD_LOCAL) };
        if handle.is_null() {
            bail!("dlopen {name}: {}", last_dl_error());
        }
        Ok(Self {
            handle,
            name: name.to_string(),
        })
    }

    fn symbol(&self, name: &str) -> Option<*mut c_void> {
        let c_name = CString::new(name).ok()?;
        // SAFETY: handle came from a successful dlopen and is still open.
        let sym = unsafe { libc::dlsym(self.handle, c_name.as_ptr()) };
        let found = !sym.is_null();
        debug!(library = %self.name, symbol = name, found, "dlsym");
        found.then_some(sym)
    }
}

impl Drop for Library {
    fn drop(&mut self) {
        // SAFETY: handle came from dlopen and is closed exactly once.
        unsafe {
            libc::dlclose(self.handle);
        }
    }
}

fn last_dl_error() -> String {
    // SAFETY: dlerror returns NULL or a NUL-terminated thread-local string.
    let message = unsafe { libc::dlerror() };
    if message.is_null() {
        return "unknown dynamic loader error".to_string();
    }
    // SAFETY: non-null pointer from dlerror, read before any other dl call.
    unsafe { CStr::from_ptr(message) }
        .to_string_lossy()
        .into_owned()
}

/// Required entry points plus the library that owns them.
struct Gss {
    library: Library,
    indicate_mechs: IndicateMechsFn,
    inquire_mechs_for_name: InquireMechsForNameFn,
    inquire_names_for_mech: InquireNamesForMechFn,
    import_name: ImportNameFn,
    release_name: ReleaseNameFn,
    release_oid_set: ReleaseOidSetFn,
    release_buffer: ReleaseBufferFn,
    display_status: DisplayStatusFn,
}

impl Gss {
    fn bind(library: Library) -> Result<Self> {
        let missing = |symbol: &str| anyhow!("{} lacks required symbol {symbol}", library.name);
        Ok(Self {
            indicate_mechs: bind_symbol!(library, "gss_indicate_mechs", IndicateMechsFn)
                .ok_or_else(|| missing("gss_indicate_mechs"))?,
            inquire_mechs_for_name: bind_symbol!(
                library,
                "gss_inquire_mechs_for_name",
                InquireMechsForNameFn
            )
            .ok_or_else(|| missing("gss_inquire_mechs_for_name"))?,
            inquire_names_for_mech: bind_symbol!(
                library,
                "gss_inquire_names_for_mech",
                InquireNamesForMechFn
            )
            .ok_or_else(|| missing("gss_inquire_names_for_mech"))?,
            import_name: bind_symbol!(library, "gss_import_name", ImportNameFn)
                .ok_or_else(|| missing("gss_import_name"))?,
            release_name: bind_symbol!(library, "gss_release_name", ReleaseNameFn)
                .ok_or_else(|| missing("gss_release_name"))?,
            release_oid_set: bind_symbol!(library, "gss_release_oid_set", ReleaseOidSetFn)
                .ok_or_else(|| missing("gss_release_oid_set"))?,
            release_buffer: bind_symbol!(library, "gss_release_buffer", ReleaseBufferFn)
                .ok_or_else(|| missing("gss_release_buffer"))?,
            display_status: bind_symbol!(library, "gss_display_status", DisplayStatusFn)
                .ok_or_else(|| missing("gss_display_status"))?,
            library,
        })
    }

    /// Turn a failed major status into a `ProviderError`.
    fn check(&self, major: OmUint32, minor: OmUint32) -> Result<(), ProviderError> {
        if !status::is_error(major) {
            return Ok(());
        }
        let mut parts = Vec::new();
        self.collect_status(major, GSS_C_GSS_CODE, &mut parts);
        if minor != 0 {
            self.collect_status(minor, GSS_C_MECH_CODE, &mut parts);
        }
        let message = if parts.is_empty() {
            format!("GSS-API call failed with major status {major:#x}")
        } else {
            parts.join("; ")
        };
        Err(ProviderError::new(major, minor, message))
    }

    fn collect_status(&self, code: OmUint32, kind: c_int, out: &mut Vec<String>) {
        let mut context: OmUint32 = 0;
        loop {
            let mut minor: OmUint32 = 0;
            let mut buffer = BufferGuard::new(self);
            // SAFETY: out-params point at live locals; NULL mech means default.
            let major = unsafe {
                (self.display_status)(
                    &mut minor,
                    code,
                    kind,
                    ptr::null_mut(),
                    &mut context,
                    buffer.as_mut_ptr(),
                )
            };
            if status::is_error(major) {
                break;
            }
            let text = String::from_utf8_lossy(buffer.bytes()).trim().to_string();
            if !text.is_empty() {
                out.push(text);
            }
            if context == 0 {
                break;
            }
        }
    }
}

/// Output OID set, released on drop.
struct OidSetGuard<'a> {
    gss: &'a Gss,
    set: GssOidSet,
}

impl<'a> OidSetGuard<'a> {
    fn new(gss: &'a Gss) -> Self {
        Self {
            gss,
            set: ptr::null_mut(),
        }
    }

    fn as_mut_ptr(&mut self) -> *mut GssOidSet {
        &mut self.set
    }

    fn to_oids(&self) -> Result<Vec<Oid>, ProviderError> {
        if self.set.is_null() {
            return Ok(Vec::new());
        }
        // SAFETY: a non-null set returned by the library is a valid
        // gss_OID_set_desc whose elements array holds `count` descriptors.
        let descs = unsafe {
            let set = &*self.set;
            if set.count == 0 || set.elements.is_null() {
                return Ok(Vec::new());
            }
            std::slice::from_raw_parts(set.elements, set.count)
        };
        descs.iter().map(copy_oid).collect()
    }
}

impl Drop for OidSetGuard<'_> {
    fn drop(&mut self) {
        if self.set.is_null() {
            return;
        }
        let mut minor = 0;
        // SAFETY: set was allocated by the library and is released once.
        unsafe {
            (self.gss.release_oid_set)(&mut minor, &mut self.set);
        }
    }
}

/// Output buffer, released on drop.
struct BufferGuard<'a> {
    gss: &'a Gss,
    buffer: GssBufferDesc,
}

impl<'a> BufferGuard<'a> {
    fn new(gss: &'a Gss) -> Self {
        Self {
            gss,
            buffer: GssBufferDesc {
                length: 0,
                value: ptr::null_mut(),
            },
        }
    }

    fn as_mut_ptr(&mut self) -> *mut GssBufferDesc {
        &mut self.buffer
    }

    fn bytes(&self) -> &[u8] {
        if self.buffer.value.is_null() || self.buffer.length == 0 {
            return &[];
        }
        // SAFETY: the library filled value/length with an allocation it owns
        // until gss_release_buffer runs in drop.
        unsafe { std::slice::from_raw_parts(self.buffer.value as *const u8, self.buffer.length) }
    }
}

impl Drop for BufferGuard<'_> {
    fn drop(&mut self) {
        if self.buffer.value.is_null() {
            return;
        }
        let mut minor = 0;
        // SAFETY: buffer was filled by the library and is released once.
        unsafe {
            (self.gss.release_buffer)(&mut minor, &mut self.buffer);
        }
    }
}

/// Imported name, released on drop.
struct NameGuard<'a> {
    gss: &'a Gss,
    name: GssName,
}

impl Drop for NameGuard<'_> {
    fn drop(&mut self) {
        if self.name.is_null() {
            return;
        }
        let mut minor = 0;
        // SAFETY: name came from gss_import_name and is released once.
        unsafe {
            (self.gss.release_name)(&mut minor, &mut self.name);
        }
    }
}

/// Borrowed input descriptor; `oid` must outlive every use of the result.
fn oid_desc(oid: &Oid) -> GssOidDesc {
    GssOidDesc {
        length: oid.as_bytes().len() as OmUint32,
        elements: oid.as_bytes().as_ptr() as *mut c_void,
    }
}

fn copy_oid(desc: &GssOidDesc) -> Result<Oid, ProviderError> {
    if desc.elements.is_null() {
        return Err(ProviderError::new(status::FAILURE, 0, "provider returned a null OID"));
    }
    // SAFETY: the descriptor came from the library and spans `length` bytes.
    let bytes = unsafe {
        std::slice::from_raw_parts(desc.elements as *const u8, desc.length as usize)
    };
    Oid::from_bytes(bytes.to_vec()).map_err(|err| {
        ProviderError::new(
            status::FAILURE,
            0,
            format!("provider returned a malformed OID: {err}"),
        )
    })
}

/// Input OID set borrowing from an `OidSet`. An empty set is passed as
/// `GSS_C_NO_OID_SET`.
struct InputOidSet {
    descs: Vec<GssOidDesc>,
    set: GssOidSetDesc,
}

impl InputOidSet {
    fn new(oids: &OidSet) -> Self {
        let descs: Vec<GssOidDesc> = oids.iter().map(oid_desc).collect();
        Self {
            descs,
            set: GssOidSetDesc {
                count: 0,
                elements: ptr::null_mut(),
            },
        }
    }

    fn as_ptr(&mut self) -> GssOidSet {
        if self.descs.is_empty() {
            return ptr::null_mut();
        }
        self.set = GssOidSetDesc {
            count: self.descs.len(),
            elements: self.descs.as_mut_ptr(),
        };
        &mut self.set
    }
}

/// Provider backed by the system GSS-API library.
#[derive(Clone)]
pub struct NativeProvider {
    gss: Arc<Gss>,
    sasl_naming: Option<Arc<NativeSaslNaming>>,
    attribute_inquiry: Option<Arc<NativeAttributeInquiry>>,
}

impl NativeProvider {
    /// Open `library`, or the first platform default that loads.
    pub fn load(library: Option<&Path>) -> Result<Self> {
        let library = match library {
            Some(path) => Library::open(&path.to_string_lossy())?,
            None => open_default_library()?,
        };
        let gss = Arc::new(Gss::bind(library)?);
        let sasl_naming = NativeSaslNaming::bind(&gss).map(Arc::new);
        let attribute_inquiry = NativeAttributeInquiry::bind(&gss).map(Arc::new);
        debug!(
            library = %gss.library.name,
            rfc5801 = sasl_naming.is_some(),
            rfc5587 = attribute_inquiry.is_some(),
            "native GSS-API provider loaded"
        );
        Ok(Self {
            gss,
            sasl_naming,
            attribute_inquiry,
        })
    }

    pub fn library_name(&self) -> &str {
        &self.gss.library.name
    }
}

fn open_default_library() -> Result<Library> {
    let mut failures = Vec::new();
    for name in DEFAULT_LIBRARIES {
        match Library::open(name) {
            Ok(library) => return Ok(library),
            Err(err) => failures.push(err.to_string()),
        }
    }
    bail!(
        "Unable to load a GSS-API library. Set GSS_MECHS_LIBRARY to its path.\n{}",
        failures.join("\n")
    )
}

impl MechProvider for NativeProvider {
    fn indicate_mechs(&self) -> Result<Vec<Oid>, ProviderError> {
        let gss = self.gss.as_ref();
        let mut minor = 0;
        let mut mechs = OidSetGuard::new(gss);
        // SAFETY: out-params point at live locals.
        let major = unsafe { (gss.indicate_mechs)(&mut minor, mechs.as_mut_ptr()) };
        gss.check(major, minor)?;
        mechs.to_oids()
    }

    fn inquire_mechs_for_name(&self, name: &Name) -> Result<Vec<Oid>, ProviderError> {
        let gss = self.gss.as_ref();
        let imported = import_name(gss, name)?;
        let mut minor = 0;
        let mut mechs = OidSetGuard::new(gss);
        // SAFETY: imported.name is a live gss_name_t; out-params are locals.
        let major =
            unsafe { (gss.inquire_mechs_for_name)(&mut minor, imported.name, mechs.as_mut_ptr()) };
        gss.check(major, minor)?;
        mechs.to_oids()
    }

    fn inquire_names_for_mech(&self, mech: &Oid) -> Result<OidSet, ProviderError> {
        let gss = self.gss.as_ref();
        let mut mech_desc = oid_desc(mech);
        let mut minor = 0;
        let mut names = OidSetGuard::new(gss);
        // SAFETY: mech_desc borrows `mech`, which outlives the call.
        let major =
            unsafe { (gss.inquire_names_for_mech)(&mut minor, &mut mech_desc, names.as_mut_ptr()) };
        gss.check(major, minor)?;
        Ok(names.to_oids()?.into_iter().collect())
    }

    fn bind_extension(&self, extension: Extension) -> Option<ExtensionHandle> {
        match extension {
            Extension::Rfc5801 => {
                let handle: Arc<dyn SaslNaming> = self.sasl_naming.clone()?;
                Some(ExtensionHandle::SaslNaming(handle))
            }
            Extension::Rfc5587 => {
                let handle: Arc<dyn AttributeInquiry> = self.attribute_inquiry.clone()?;
                Some(ExtensionHandle::AttributeInquiry(handle))
            }
        }
    }
}

fn import_name<'a>(gss: &'a Gss, name: &Name) -> Result<NameGuard<'a>, ProviderError> {
    let mut value = name.value.as_bytes().to_vec();
    let mut buffer = GssBufferDesc {
        length: value.len(),
        value: value.as_mut_ptr() as *mut c_void,
    };
    let mut type_desc = name.name_type.as_ref().map(oid_desc);
    let type_ptr: GssOid = match type_desc.as_mut() {
        Some(desc) => desc,
        None => ptr::null_mut(),
    };
    let mut guard = NameGuard {
        gss,
        name: ptr::null_mut(),
    };
    let mut minor = 0;
    // SAFETY: buffer borrows `value`; type_ptr is null or borrows name_type.
    let major = unsafe { (gss.import_name)(&mut minor, &mut buffer, type_ptr, &mut guard.name) };
    gss.check(major, minor)?;
    Ok(guard)
}

struct NativeSaslNaming {
    gss: Arc<Gss>,
    inquire_saslname_for_mech: InquireSaslnameForMechFn,
    inquire_mech_for_saslname: InquireMechForSaslnameFn,
}

impl NativeSaslNaming {
    fn bind(gss: &Arc<Gss>) -> Option<Self> {
        let library = &gss.library;
        Some(Self {
            inquire_saslname_for_mech: bind_symbol!(
                library,
                "gss_inquire_saslname_for_mech",
                InquireSaslnameForMechFn
            )?,
            inquire_mech_for_saslname: bind_symbol!(
                library,
                "gss_inquire_mech_for_saslname",
                InquireMechForSaslnameFn
            )?,
            gss: Arc::clone(gss),
        })
    }
}

impl SaslNaming for NativeSaslNaming {
    fn inquire_saslname_for_mech(&self, mech: &Oid) -> Result<SaslNameInfo, ProviderError> {
        let gss = self.gss.as_ref();
        let mut mech_desc = oid_desc(mech);
        let mut sasl_name = BufferGuard::new(gss);
        let mut mech_name = BufferGuard::new(gss);
        let mut description = BufferGuard::new(gss);
        let mut minor = 0;
        // SAFETY: mech_desc borrows `mech`; buffers are released by guards.
        let major = unsafe {
            (self.inquire_saslname_for_mech)(
                &mut minor,
                &mut mech_desc,
                sasl_name.as_mut_ptr(),
                mech_name.as_mut_ptr(),
                description.as_mut_ptr(),
            )
        };
        gss.check(major, minor)?;
        Ok(SaslNameInfo {
            sasl_mech_name: sasl_name.bytes().to_vec(),
            mech_name: mech_name.bytes().to_vec(),
            mech_description: description.bytes().to_vec(),
        })
    }

    fn inquire_mech_for_saslname(&self, sasl_name: &[u8]) -> Result<Oid, ProviderError> {
        let gss = self.gss.as_ref();
        let mut value = sasl_name.to_vec();
        let mut buffer = GssBufferDesc {
            length: value.len(),
            value: value.as_mut_ptr() as *mut c_void,
        };
        let mut mech: GssOid = ptr::null_mut();
        let mut minor = 0;
        // SAFETY: buffer borrows `value`; the returned OID is static storage
        // owned by the library and is copied, not freed.
        let major = unsafe { (self.inquire_mech_for_saslname)(&mut minor, &mut buffer, &mut mech) };
        gss.check(major, minor)?;
        if mech.is_null() {
            return Err(ProviderError::new(
                status::BAD_MECH,
                0,
                "provider resolved the SASL name to no mechanism",
            ));
        }
        // SAFETY: non-null OID returned by a successful call.
        copy_oid(unsafe { &*mech })
    }
}

struct NativeAttributeInquiry {
    gss: Arc<Gss>,
    inquire_attrs_for_mech: InquireAttrsForMechFn,
    indicate_mechs_by_attrs: IndicateMechsByAttrsFn,
    display_mech_attr: DisplayMechAttrFn,
}

impl NativeAttributeInquiry {
    fn bind(gss: &Arc<Gss>) -> Option<Self> {
        let library = &gss.library;
        Some(Self {
            inquire_attrs_for_mech: bind_symbol!(
                library,
                "gss_inquire_attrs_for_mech",
                InquireAttrsForMechFn
            )?,
            indicate_mechs_by_attrs: bind_symbol!(
                library,
                "gss_indicate_mechs_by_attrs",
                IndicateMechsByAttrsFn
            )?,
            display_mech_attr: bind_symbol!(library, "gss_display_mech_attr", DisplayMechAttrFn)?,
            gss: Arc::clone(gss),
        })
    }
}

impl AttributeInquiry for NativeAttributeInquiry {
    fn inquire_attrs_for_mech(&self, mech: &Oid) -> Result<MechAttrs, ProviderError> {
        let gss = self.gss.as_ref();
        let mut mech_desc = oid_desc(mech);
        let mut attrs = OidSetGuard::new(gss);
        let mut known = OidSetGuard::new(gss);
        let mut minor = 0;
        // SAFETY: mech_desc borrows `mech`; sets are released by guards.
        let major = unsafe {
            (self.inquire_attrs_for_mech)(
                &mut minor,
                &mut mech_desc,
                attrs.as_mut_ptr(),
                known.as_mut_ptr(),
            )
        };
        gss.check(major, minor)?;
        Ok(MechAttrs {
            mech_attrs: attrs.to_oids()?.into_iter().collect(),
            known_mech_attrs: known.to_oids()?.into_iter().collect(),
        })
    }

    fn indicate_mechs_by_attrs(
        &self,
        desired: &OidSet,
        except: &OidSet,
        critical: &OidSet,
    ) -> Result<Vec<Oid>, ProviderError> {
        let gss = self.gss.as_ref();
        let mut desired = InputOidSet::new(desired);
        let mut except = InputOidSet::new(except);
        let mut critical = InputOidSet::new(critical);
        let mut mechs = OidSetGuard::new(gss);
        let mut minor = 0;
        // SAFETY: input sets borrow caller-owned OIDs for the whole call.
        let major = unsafe {
            (self.indicate_mechs_by_attrs)(
                &mut minor,
                desired.as_ptr(),
                except.as_ptr(),
                critical.as_ptr(),
                mechs.as_mut_ptr(),
            )
        };
        gss.check(major, minor)?;
        mechs.to_oids()
    }

    fn display_mech_attr(&self, attr: &Oid) -> Result<MechAttrInfo, ProviderError> {
        let gss = self.gss.as_ref();
        let mut attr_desc = oid_desc(attr);
        let mut name = BufferGuard::new(gss);
        let mut short_desc = BufferGuard::new(gss);
        let mut long_desc = BufferGuard::new(gss);
        let mut minor = 0;
        // SAFETY: attr_desc borrows `attr`; buffers are released by guards.
        let major = unsafe {
            (self.display_mech_attr)(
                &mut minor,
                &mut attr_desc,
                name.as_mut_ptr(),
                short_desc.as_mut_ptr(),
                long_desc.as_mut_ptr(),
            )
        };
        gss.check(major, minor)?;
        Ok(MechAttrInfo {
            name: String::from_utf8_lossy(name.bytes()).into_owned(),
            short_desc: String::from_utf8_lossy(short_desc.bytes()).into_owned(),
            long_desc: String::from_utf8_lossy(long_desc.bytes()).into_owned(),
        })
    }
}
